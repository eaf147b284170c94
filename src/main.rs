#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use grid_snake::GameConfig;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::from_file(&path)
            .with_context(|| format!("loading config from {path}"))?,
        None => GameConfig::default(),
    };

    let settings = config.window_settings();
    grid_snake::run(config, settings)
        .map_err(|err| anyhow::anyhow!("opening game window failed: {err}"))?;
    Ok(())
}

// The browser build starts from the library's wasm-bindgen entry point.
#[cfg(target_arch = "wasm32")]
fn main() {}
