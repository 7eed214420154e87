use std::io;

use detectx_prep::common::PrepConfig;
use detectx_prep::data::prompt_platform_and_size;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    let config = PrepConfig::default();
    log::debug!("{}", config);

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut stdout = io::stdout();
    let (platform, image_size) = prompt_platform_and_size(&mut reader, &mut stdout)?;

    detectx_prep::generate_model_json(&config, &platform, image_size)?;
    detectx_prep::generate_settings_json(&config)?;

    Ok(())
}
