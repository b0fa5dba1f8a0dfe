use anyhow::Result;
use ball_pit::Simulation;

const CONFIG_PATH: &str = "assets/simulation.ron";

fn main() -> Result<()> {
    let sim = Simulation::load_or_default(CONFIG_PATH)?;
    sim.simulate();
    Ok(())
}
