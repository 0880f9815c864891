mod landlock;

use intake_api::setup;
use intake_core::Config;

// Use mimalloc as the global allocator.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::from_env()?;

    // Data directories only exist after setup, so the sandbox is applied afterwards.
    let (state, router) = setup::initialize_app(config).await?;

    if state.config.landlock_enabled() {
        landlock::linux::init(&[
            state.config.applications_dir(),
            state.config.temp_uploads_dir(),
        ]);
    }

    setup::server::start_server(&state.config, router).await?;

    Ok(())
}
