use ceiling_protocol::SaleError;
use ceiling_protocol_testing::{
    deterministic_identity, CampaignSnapshot, FixtureStage, TestFixture, LEGACY_HOLDER_BALANCE,
};

/// Test a legacy holder can swap exactly once
///
/// **Test flow:**
/// 1. Claims before finalization fail with NotFinalized
/// 2. The sole holder receives the whole exchange pool
/// 3. A second claim fails with AlreadyClaimed and changes nothing
/// 4. An identity without legacy balance has nothing to claim
#[test]
fn test_swap_claim_exclusivity() {
    let mut test = TestFixture::default();
    let holder = test.state.legacy_holder;
    let exchange_pool = test.state.config.pools.exchange_pool;

    // 1. Too early
    test.jump_to(FixtureStage::CeilingFilled);
    assert_eq!(test.try_claim(&holder), Err(SaleError::NotFinalized));
    assert_eq!(test.sale.claimable(&holder), Err(SaleError::NotFinalized));

    // 2. Claim
    test.jump_to(FixtureStage::Finalized);
    assert_eq!(test.sale.claimable(&holder), Ok(1_630));
    assert_eq!(test.try_claim(&holder), Ok(1_630));
    assert_eq!(test.balance_of(&holder), 1_630);
    assert_eq!(test.balance_of(&exchange_pool), 0);

    let claim = test.sale.swap_claim(&holder).unwrap();
    assert!(claim.claimed);
    assert_eq!(claim.legacy_balance_snapshot, LEGACY_HOLDER_BALANCE);
    println!("✅ Holder swapped the whole pool");

    // 3. Duplicate
    let before = CampaignSnapshot::capture_all(&test);
    assert_eq!(test.try_claim(&holder), Err(SaleError::AlreadyClaimed));
    assert_eq!(test.sale.claimable(&holder), Ok(0));
    assert_eq!(before, CampaignSnapshot::capture_all(&test));
    println!("✅ Duplicate claim rejected");

    // 4. Stranger
    let stranger = deterministic_identity("stranger");
    assert_eq!(test.try_claim(&stranger), Err(SaleError::NothingToClaim));
    assert!(test.sale.swap_claim(&stranger).is_none());
}

/// Test proportional payouts across holders never exceed the pool
#[test]
fn test_swap_proportional_payouts() {
    let mut test = TestFixture::default();
    let holder = test.state.legacy_holder;
    let other = deterministic_identity("other_legacy_holder");
    test.legacy.set_balance(other, 0, 2_500);

    test.jump_to(FixtureStage::Finalized);
    let pool = test.sale.allocation().unwrap().exchange;

    // 1_630 * 5_000 / 7_500 and 1_630 * 2_500 / 7_500, rounded down
    assert_eq!(test.try_claim(&holder), Ok(1_086));
    assert_eq!(test.try_claim(&other), Ok(543));

    let paid = test.balance_of(&holder) + test.balance_of(&other);
    assert!(paid <= pool);
    assert_eq!(pool - paid, 1); // dust stays in the pool
    assert_eq!(test.balance_of(&test.state.config.pools.exchange_pool), 1);
    println!("✅ Proportional payouts with rounding dust left behind");
}

/// Test legacy balances are read at the finalization height
#[test]
fn test_swap_uses_finalization_snapshot() {
    let mut test = TestFixture::default();
    let holder = test.state.legacy_holder;
    test.jump_to(FixtureStage::Finalized);
    let snapshot_height = test.sale.finalized_height().unwrap();

    // Moving legacy balance after the snapshot changes nothing.
    test.legacy.set_balance(holder, snapshot_height + 1, 0);
    test.advance_blocks(5);
    assert_eq!(test.try_claim(&holder), Ok(1_630));
}
