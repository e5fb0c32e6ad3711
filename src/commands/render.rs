use anyhow::Result;
use ringprov::config::Config;
use ringprov::presentation::{render_generated, RenderTarget};

pub fn cmd_render(config: &Config, target: RenderTarget) -> Result<()> {
    print!("{}", render_generated(config, target));
    Ok(())
}
