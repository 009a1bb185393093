use ceiling_protocol::{SaleError, TransferPolicy, TRANSFER_LOCK_SECONDS};
use ceiling_protocol_testing::{deterministic_identity, FixtureStage, TestFixture, GENESIS_TIME};

/// Test transfers are blocked while contributions are running
#[test]
fn test_transfers_blocked_during_sale() {
    let mut test = TestFixture::default();
    let (buyer, friend) = (test.state.buyer, deterministic_identity("friend"));

    test.jump_to(FixtureStage::FirstCapFilled);
    assert_eq!(test.balance_of(&buyer), 3_000);
    assert_eq!(
        test.try_transfer(&buyer, &friend, 1),
        Err(SaleError::TransferLocked { unlock_time: None })
    );
    assert_eq!(test.ledger.policy(), TransferPolicy::SaleInProgress);
    println!("✅ Transfers blocked before finalization");
}

/// Test the post-sale lock and its boundary
///
/// **Test flow:**
/// 1. Finalize; the ledger now carries the gate's policy
/// 2. Holder transfers fail until exactly the unlock time
/// 3. At the unlock time transfers go through
#[test]
fn test_transfer_lock_boundary() {
    let mut test = TestFixture::default();
    let (buyer, friend) = (test.state.buyer, deterministic_identity("friend"));
    let unlock_time = GENESIS_TIME + TRANSFER_LOCK_SECONDS;

    // 1. Finalize
    test.jump_to(FixtureStage::Finalized);
    let gate = test.sale.controller_gate().unwrap();
    assert_eq!(gate.unlock_time(), unlock_time);
    assert!(gate.is_locked(GENESIS_TIME));
    assert_eq!(test.ledger.policy(), gate.transfer_policy());

    // 2. Locked
    let locked = Err(SaleError::TransferLocked {
        unlock_time: Some(unlock_time),
    });
    assert_eq!(test.try_transfer(&buyer, &friend, 1), locked);
    test.clock.set_time(unlock_time - 1);
    assert_eq!(test.try_transfer(&buyer, &friend, 1), locked);
    assert_eq!(test.balance_of(&friend), 0);

    // 3. Unlocked
    test.clock.set_time(unlock_time);
    assert_eq!(test.try_transfer(&buyer, &friend, 1), Ok(()));
    assert_eq!(test.balance_of(&friend), 1);
    assert_eq!(test.balance_of(&buyer), 7_999);
    println!("✅ Transfers open at {}", unlock_time);
}

/// Test the exchange pool pays swaps while holders stay locked
#[test]
fn test_exchange_pool_exempt_from_lock() {
    let mut test = TestFixture::default();
    let holder = test.state.legacy_holder;
    let secondary_pool = test.state.config.pools.secondary_pool;
    let friend = deterministic_identity("friend");

    test.jump_to(FixtureStage::Finalized);
    assert_eq!(test.try_claim(&holder), Ok(1_630));
    assert!(matches!(
        test.try_transfer(&holder, &friend, 1),
        Err(SaleError::TransferLocked { .. })
    ));
    assert!(matches!(
        test.try_transfer(&secondary_pool, &friend, 1),
        Err(SaleError::TransferLocked { .. })
    ));
}
