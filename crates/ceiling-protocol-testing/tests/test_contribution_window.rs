use ceiling_protocol::SaleError;
use ceiling_protocol_testing::{
    CampaignSnapshot, FixtureStage, TestFixture, START_HEIGHT, STOP_HEIGHT,
};

/// Test contributions are only accepted inside [start, stop]
///
/// **Test flow:**
/// 1. Reveal the first point while still before the start height
/// 2. Contribution before the window fails with OutsideWindow and changes nothing
/// 3. Contribution at the last height of the window is accepted
/// 4. Contribution one block past the window fails with OutsideWindow
#[test]
fn test_contribution_outside_window() {
    let mut test = TestFixture::default();
    let buyer = test.state.buyer;

    // 1. Reveal early; clock is still before the start height
    test.jump_to(FixtureStage::ScheduleCommitted);
    test.try_reveal(0).unwrap();
    let height = test.sale.current_height();
    assert!(height < START_HEIGHT);

    // 2. Before the window
    let before = CampaignSnapshot::capture_all(&test);
    assert_eq!(
        test.try_contribute(&buyer, 1),
        Err(SaleError::OutsideWindow {
            height,
            start: START_HEIGHT,
            stop: STOP_HEIGHT,
        })
    );
    assert_eq!(before, CampaignSnapshot::capture_all(&test));
    println!("✅ Early contribution rejected without state change");

    // 3. Last block of the window
    test.clock.set_height(STOP_HEIGHT);
    assert_eq!(test.try_contribute(&buyer, 1).unwrap().accepted, 1);

    // 4. Past the window
    test.clock.set_height(STOP_HEIGHT + 1);
    assert!(matches!(
        test.try_contribute(&buyer, 1),
        Err(SaleError::OutsideWindow { .. })
    ));
    assert_eq!(test.sale.total_collected(), 1);
    println!("✅ Window boundaries are inclusive");
}

/// Test zero-value contributions and contributions with no revealed cap
#[test]
fn test_contribution_rejects_zero_and_unrevealed_cap() {
    let mut test = TestFixture::default();
    let buyer = test.state.buyer;

    // In the window but nothing revealed: the ceiling is 0
    test.jump_to(FixtureStage::ScheduleCommitted);
    test.clock.set_height(START_HEIGHT);
    assert_eq!(test.sale.current_ceiling(), 0);
    assert_eq!(
        test.try_contribute(&buyer, 1),
        Err(SaleError::CeilingReached)
    );

    test.jump_to(FixtureStage::SaleOpened);
    assert_eq!(test.try_contribute(&buyer, 0), Err(SaleError::ZeroAmount));

    // Window is checked before the amount
    test.clock.set_height(START_HEIGHT - 1);
    assert!(matches!(
        test.try_contribute(&buyer, 0),
        Err(SaleError::OutsideWindow { .. })
    ));
    assert_eq!(test.sale.total_collected(), 0);
    assert_eq!(test.balance_of(&buyer), 0);
    println!("✅ Zero amounts and unrevealed caps rejected");
}
