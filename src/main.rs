/*!
 * IPC Debugger Simulator - Demo Entry Point
 *
 * Runs the scripted queue-overflow flow, then an interactive-style
 * walkthrough over two links, and prints both logs.
 */

use std::error::Error;
use tracing::{error, info, warn};

use ipc_debugger::{
    init_tracing, run_scripted, SimEvent, SimulationConfig, SimulationHandle,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    info!("IPC debugger simulator starting...");

    let scripted = run_scripted(&SimulationConfig::scripted());
    println!("== Scripted run ==");
    for line in scripted.log.render() {
        println!("{}", line);
    }

    let config = match SimulationConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid simulator configuration");
            return Err(e.into());
        }
    };
    info!(?config, "Interactive walkthrough configured");

    let sim = SimulationHandle::new(config);
    let events = sim.subscribe();

    sim.add_process();
    sim.add_process();
    sim.create_link()?;
    for text in ["hello", "world", "are you there?"] {
        let report = sim.send_message(text)?;
        if report.alert_raised() {
            warn!(message = %report.message, deadlock = report.deadlock_suspected, "Alert raised");
        }
    }
    sim.settle().await;

    sim.add_process();
    sim.create_link()?;
    sim.send_message("ping")?;
    sim.settle().await;

    println!("== Interactive walkthrough ==");
    for line in sim.rendered_log() {
        println!("{}", line);
    }
    if sim.deadlock_suspected() {
        println!("Deadlock suspected in IPC simulation");
    }

    let dump_events = std::env::var("IPC_SIM_EVENTS_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);
    if dump_events {
        println!("== Events ==");
        for event in events.try_iter() {
            println!("{}", serde_json::to_string::<SimEvent>(&event)?);
        }
    }

    info!("IPC debugger simulator finished");
    Ok(())
}
