use ceiling_protocol::SaleError;
use ceiling_protocol_testing::{FixtureStage, TestFixture};

/// Test the escrow releases contributed value only after the sale
///
/// **Test flow:**
/// 1. Withdrawal during the sale fails
/// 2. Only the configured recipient can withdraw
/// 3. After finalization everything held is released once
#[test]
fn test_escrow_withdraw_after_finalize() {
    let mut test = TestFixture::default();
    let recipient = test.state.escrow_recipient;
    let buyer = test.state.buyer;

    // 1. During the sale
    test.jump_to(FixtureStage::SecondPointFunded);
    assert_eq!(test.escrow.held(), 8);
    assert_eq!(
        test.try_withdraw_escrow(&recipient),
        Err(SaleError::NotFinalized)
    );

    // 2. Wrong caller
    test.jump_to(FixtureStage::Finalized);
    assert_eq!(
        test.try_withdraw_escrow(&buyer),
        Err(SaleError::Unauthorized)
    );

    // 3. Release
    assert_eq!(test.try_withdraw_escrow(&recipient), Ok(15));
    assert_eq!(test.escrow.held(), 0);
    assert_eq!(test.escrow.withdrawn(), 15);
    assert_eq!(test.try_withdraw_escrow(&recipient), Ok(0));
    assert_eq!(test.escrow.withdrawn(), 15);
    println!("✅ Escrow released 15 to {}", recipient);
}

/// Test the escrow opens once the window closes, finalized or not
#[test]
fn test_escrow_withdraw_after_window() {
    let mut test = TestFixture::default();
    let recipient = test.state.escrow_recipient;
    test.jump_to(FixtureStage::SecondPointFunded);

    test.clock.set_height(test.state.config.stop_height);
    assert_eq!(
        test.try_withdraw_escrow(&recipient),
        Err(SaleError::NotFinalized)
    );

    test.advance_blocks(1);
    assert_eq!(test.try_withdraw_escrow(&recipient), Ok(8));
    assert_eq!(test.sale.finalized_height(), None);
}
