use ceiling_protocol::{SaleError, SaleEvent};
use ceiling_protocol_testing::{deterministic_identity, FixtureStage, TestFixture};

/// Test the controller can only be changed after finalization, by an
/// authorized caller
///
/// **Test flow:**
/// 1. No controller exists before finalization
/// 2. Finalization installs the configured controller
/// 3. Unauthorized callers are rejected
/// 4. The controller can be handed over repeatedly
#[test]
fn test_controller_handoff() {
    let mut test = TestFixture::default();
    let multisig = test.state.multisig;
    let successor = deterministic_identity("successor");
    let third = deterministic_identity("third_controller");

    // 1. Before finalization
    test.jump_to(FixtureStage::CeilingFilled);
    assert_eq!(test.sale.controller(), None);
    assert_eq!(
        test.try_change_controller(&successor),
        Err(SaleError::NotFinalized)
    );

    // 2. Installed by finalize
    test.jump_to(FixtureStage::Finalized);
    assert_eq!(test.sale.controller(), Some(multisig));

    // 3. Stranger
    assert_eq!(
        test.sale.change_controller(&test.state.buyer, &successor),
        Err(SaleError::Unauthorized)
    );
    assert_eq!(test.sale.controller(), Some(multisig));

    // 4. Hand over twice
    test.try_change_controller(&successor).unwrap();
    assert_eq!(test.sale.controller(), Some(successor));
    test.try_change_controller(&third).unwrap();
    assert_eq!(test.sale.controller(), Some(third));

    let changes: Vec<_> = test
        .sale
        .events()
        .iter()
        .filter_map(|event| match event {
            SaleEvent::ControllerChanged { previous, new } => Some((*previous, *new)),
            _ => None,
        })
        .collect();
    assert_eq!(changes, vec![(multisig, successor), (successor, third)]);
    println!("✅ Controller handed over twice");
}

/// Test a controller change leaves the transfer lock untouched
#[test]
fn test_controller_change_keeps_unlock_time() {
    let mut test = TestFixture::default();
    test.jump_to(FixtureStage::Finalized);
    let unlock_time = test.sale.controller_gate().unwrap().unlock_time();

    test.try_change_controller(&deterministic_identity("successor"))
        .unwrap();
    assert_eq!(test.sale.controller_gate().unwrap().unlock_time(), unlock_time);
    assert_eq!(
        test.ledger.policy(),
        test.sale.controller_gate().unwrap().transfer_policy()
    );
}
