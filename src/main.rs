mod console;

fn main() -> anyhow::Result<()> {
    simple_logger::SimpleLogger::new()
        .with_colors(true)
        .with_threads(true)
        .with_local_timestamps()
        .init()?;

    let channels = coolschool_bridge::BridgeChannels::default();
    let backend = coolschool_backend::run(channels.backend_rx, channels.backend_tx);
    let console = console::run(channels.frontend_rx, channels.frontend_tx);

    match backend.join() {
        Ok(result) => result?,
        Err(_) => anyhow::bail!("backend thread panicked"),
    }
    console
}
