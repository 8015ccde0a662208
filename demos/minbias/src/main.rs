//! Minimum-bias demo run
//!
//! Drives a full configure → initialize → step sequence against the
//! reference engine and prints per-event final-state summaries.

use hadro_core::pdg::pid;
use hadro_core::{HadroResult, Kinematics};
use hadro_session::GeneratorSession;
use hadro_testkit::Minijet;

fn main() -> HadroResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mut session = GeneratorSession::new(Minijet::new());
    session.configure(Kinematics::center_of_mass(10.0, pid::PROTON, pid::PROTON))?;
    let seed = session.initialize(None)?;
    println!("=== minbias: 10 GeV pp, seed {seed} ===\n");

    let xs = session.cross_section()?;
    println!("cross sections [mb]:");
    println!("  total          {:6.2}", xs.total);
    println!("  elastic        {:6.2}", xs.elastic);
    println!("  inelastic      {:6.2}", xs.inelastic);
    println!("  non-diffr.     {:6.2}", xs.non_diffractive);
    println!("  diffr. Xb/aX/XX {:5.2} / {:.2} / {:.2}\n", xs.diffractive_xb, xs.diffractive_ax, xs.diffractive_xx);

    // Keep pi0 out of the final state for the printed summaries
    session.set_stable(pid::PI_ZERO, true)?;

    for n in 1..=5 {
        let mut event = session.step()?;
        let total = event.unfiltered_len();
        event.select_final_state();
        let final_state = event.len();
        let mean_pt = event.pt().iter().sum::<f64>() / final_state.max(1) as f64;

        event.select_final_state_charged();
        let charged = event.len();

        println!(
            "event {n}: {total:3} stack entries, {final_state:3} final ({charged} charged), \
             <pt> {mean_pt:.3} GeV, b = {:.2} fm",
            event.impact_parameter().unwrap_or(f64::NAN),
        );
    }

    Ok(())
}
