use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use scopeguard::defer;
use std::{io, time::Instant};

use rap_legacy::{App, Config, logging, render};

/// 退出时（包括出错）恢复终端
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

fn main() -> Result<()> {
    let (mut config, config_errors) = Config::from_env();
    if config.seed.is_none() {
        config.seed = Some(rand::random());
    }

    let _log_guard = logging::init_logging(&config.log_dir, &config.log_filter)?;
    for err in &config_errors {
        tracing::warn!(error = %err, "ignoring invalid config value");
    }
    tracing::info!(
        config = %serde_json::to_string(&config).unwrap_or_default(),
        "starting rap legacy"
    );
    defer! {
        tracing::info!("rap legacy stopped");
    }

    let _guard = TerminalGuard;
    enable_raw_mode().context("Failed to enable raw mode")?;
    execute!(io::stdout(), EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = run(&mut terminal, App::new(config));
    if let Err(e) = &result {
        tracing::error!(error = %e, "game loop crashed");
    }
    result
}

/// 帧循环：轮询输入 → 处理按键 → 更新 → 绘制
fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    let tick = app.config().tick();
    let mut last_frame = Instant::now();

    while !app.should_quit() {
        terminal
            .draw(|frame| render::draw(frame, &app))
            .context("Failed to draw frame")?;

        if event::poll(tick).context("Failed to poll terminal events")? {
            if let Event::Key(key) = event::read().context("Failed to read terminal event")? {
                app.handle_key(key);
            }
        }

        let now = Instant::now();
        app.update(now.duration_since(last_frame));
        last_frame = now;
    }

    Ok(())
}
