pub mod chunk_writer_logic;
pub mod writer_guard;

pub fn init() -> crate::Result<()> {
    tracing::info!("Initializing chunk writer logic");
    Ok(())
}
