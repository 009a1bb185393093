use ceiling_protocol::{Action, SaleError, SECONDS_PER_DAY};
use ceiling_protocol_testing::{
    deterministic_identity, FixtureStage, FixtureState, TestFixture, GENESIS_TIME,
};

/// Test the two-step vesting schedule
///
/// **Test flow:**
/// 1. Release before finalization fails with NotFinalized
/// 2. Release while locked is a no-op
/// 3. One step in: half the pool; repeated calls pay nothing more
/// 4. Two steps in: the rest; afterwards nothing is left
#[test]
fn test_vesting_release_steps() {
    let mut test = TestFixture::default();
    let pools = test.state.config.pools;

    // 1. Not yet finalized
    test.jump_to(FixtureStage::CeilingFilled);
    assert_eq!(test.try_release(), Err(SaleError::NotFinalized));

    test.jump_to(FixtureStage::Finalized);
    let allocation = test.sale.allocation().unwrap().vesting;
    assert_eq!(allocation, 6_521);
    let events_after_finalize = test.sale.events().len();

    // 2. Locked
    assert_eq!(test.try_release(), Ok(0));
    test.clock.set_time(GENESIS_TIME + 359 * SECONDS_PER_DAY);
    assert_eq!(test.try_release(), Ok(0));
    assert_eq!(test.sale.vested_amount(test.sale.now()), 0);
    assert_eq!(test.sale.events().len(), events_after_finalize);
    println!("✅ Nothing released while locked");

    // 3. Half
    test.clock.set_time(GENESIS_TIME + 360 * SECONDS_PER_DAY);
    assert_eq!(test.try_release(), Ok(3_260));
    assert_eq!(test.try_release(), Ok(0));
    test.advance_days(200);
    assert_eq!(test.try_release(), Ok(0));
    assert_eq!(test.balance_of(&pools.vesting_recipient), 3_260);
    println!("✅ Half vested after one step");

    // 4. All
    test.clock.set_time(GENESIS_TIME + 720 * SECONDS_PER_DAY);
    assert_eq!(test.try_release(), Ok(3_261));
    test.advance_days(1_000);
    assert_eq!(test.try_release(), Ok(0));

    let record = test.sale.vesting_record().unwrap();
    assert_eq!(record.released, record.allocation);
    assert_eq!(record.vesting_start, GENESIS_TIME);
    assert_eq!(test.balance_of(&pools.vesting_recipient), allocation);
    assert_eq!(test.balance_of(&pools.vesting_vault), 0);
    println!("✅ Fully vested after two steps");
}

/// Test only an authorized caller can release
#[test]
fn test_vesting_release_requires_authorization() {
    let mut test = TestFixture::default();
    let recipient = test.state.config.pools.vesting_recipient;
    test.jump_to(FixtureStage::Finalized);
    test.clock.set_time(GENESIS_TIME + 400 * SECONDS_PER_DAY);

    assert_eq!(test.sale.release(&recipient), Err(SaleError::Unauthorized));
    assert_eq!(test.sale.vesting_record().unwrap().released, 0);

    test.grant(recipient, Action::ReleaseVesting);
    assert_eq!(test.sale.release(&recipient), Ok(3_260));
    println!("✅ Release gated by the authorizer");
}

/// Test released never decreases and never exceeds the allocation
#[test]
fn test_vesting_monotonic_over_time() {
    let mut test = TestFixture::default();
    test.jump_to(FixtureStage::Finalized);

    let mut last_released = 0;
    for day in (0..=900).step_by(45) {
        test.clock.set_time(GENESIS_TIME + day * SECONDS_PER_DAY);
        test.try_release().unwrap();

        let record = *test.sale.vesting_record().unwrap();
        assert!(record.released >= last_released);
        assert!(record.released <= record.allocation);
        last_released = record.released;
    }
    assert_eq!(last_released, 6_521);
}

/// Test the vested amount at each step boundary
#[test]
fn test_vested_amount_boundaries() {
    let mut test = TestFixture::default();
    assert_eq!(test.sale.vested_amount(GENESIS_TIME + 1_000 * SECONDS_PER_DAY), 0);

    test.jump_to(FixtureStage::Finalized);
    let step = test.state.config.vesting_step_seconds;
    let vested = |offset: i64| test.sale.vested_amount(GENESIS_TIME + offset);

    assert_eq!(vested(step - 1), 0);
    assert_eq!(vested(step), 3_260);
    assert_eq!(vested(2 * step - 1), 3_260);
    assert_eq!(vested(2 * step), 6_521);
    assert_eq!(vested(10 * step), 6_521);
}

/// Test vesting pays out even while holder transfers are still locked
///
/// **Test flow:**
/// 1. Finalize a sale whose vesting step is shorter than the transfer lock
/// 2. Release after one step, inside the lock window
/// 3. The recipient's own tokens stay locked until the unlock time
#[test]
fn test_vesting_release_during_transfer_lock() {
    // 1. One-day vesting step, fourteen-day lock
    let state = FixtureState::default();
    let mut config = state.config.clone();
    config.vesting_step_seconds = SECONDS_PER_DAY;
    let mut test = TestFixture::new(state.with_config(config));
    let recipient = test.state.config.pools.vesting_recipient;
    test.jump_to(FixtureStage::Finalized);

    // 2. Release inside the lock
    test.advance_days(1);
    assert!(test.sale.controller_gate().unwrap().is_locked(test.sale.now()));
    assert_eq!(test.try_release(), Ok(3_260));
    test.advance_days(1);
    assert_eq!(test.try_release(), Ok(3_261));
    assert_eq!(test.balance_of(&recipient), 6_521);
    println!("✅ Vesting released during the transfer lock");

    // 3. Recipient still locked
    let friend = deterministic_identity("friend");
    assert!(matches!(
        test.try_transfer(&recipient, &friend, 1),
        Err(SaleError::TransferLocked { .. })
    ));
}
