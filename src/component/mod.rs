pub mod repro_workflow_component;

use crate::logic;

pub fn init() -> crate::Result<()> {
    tracing::info!("Initializing repro workflow component");
    logic::init()?;
    Ok(())
}
