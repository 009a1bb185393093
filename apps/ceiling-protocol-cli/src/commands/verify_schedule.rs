use ceiling_protocol_sdk::RevealPlan;
use std::path::PathBuf;

use crate::error::CliResult;

/// Re-hash a reveal plan against its own commitments
pub fn execute(plan: PathBuf) -> CliResult<()> {
    println!("🔍 Verifying reveal plan: {}", plan.display());

    let plan = RevealPlan::load_json(&plan)?;
    plan.verify()?;

    for step in &plan.reveals {
        println!(
            "  - #{}: height {} cap {}{}",
            step.index,
            step.height,
            step.cap,
            if step.is_final { " (final)" } else { "" }
        );
    }
    println!(
        "✅ {} reveal steps match their commitments ({} decoys)",
        plan.reveals.len(),
        plan.decoy_count()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::check_campaign::tests::{write_campaign, REFERENCE_POINTS};
    use crate::commands::generate_schedule::{generate, REVEAL_PLAN_FILE};

    #[test]
    fn test_verify_generated_plan() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_campaign(dir.path(), REFERENCE_POINTS);
        generate(&config, dir.path(), Some(3)).unwrap();

        execute(dir.path().join(REVEAL_PLAN_FILE)).unwrap();
    }

    #[test]
    fn test_verify_detects_tampered_cap() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_campaign(dir.path(), REFERENCE_POINTS);
        let mut plan = generate(&config, dir.path(), Some(3)).unwrap();

        plan.reveals[1].cap = 14;
        let path = dir.path().join("tampered.json");
        plan.save_json(&path).unwrap();

        assert!(execute(path).is_err());
    }
}
