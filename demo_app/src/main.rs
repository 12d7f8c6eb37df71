//! Sprite demo application
//!
//! Runs a short scripted session headlessly: a player walks over a row of
//! coins, each coin it touches is collected, and a HUD strip is drawn on top
//! of everything. Frames are recorded instead of rasterized and summarized in
//! the log.
//!
//! Usage: `sprite_demo [config.toml|config.ron]`

mod player;

use std::time::Duration;

use sprite_engine::foundation::logging;
use sprite_engine::prelude::*;

use player::Player;

const VIEWPORT: (f32, f32) = (320.0, 240.0);
const FRAME_TIME: Duration = Duration::from_nanos(16_666_667);
const DEMO_FRAMES: u64 = 180;
const COIN_COUNT: usize = 5;

/// Errors that end the demo
#[derive(thiserror::Error, Debug)]
pub enum DemoError {
    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A frame could not be drawn
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// A sprite could not be created
    #[error("Sprite error: {0}")]
    Sprite(#[from] SpriteError),
}

/// Scene, clock and input for one demo session
struct DemoApp {
    manager: SpriteManager,
    time: GameTime,
    keyboard: KeyboardState,
    recorder: CommandRecorder,
    collected: usize,
}

impl DemoApp {
    fn new(config: &SpriteManagerConfig) -> Result<Self, DemoError> {
        let mut manager = SpriteManager::with_config(config);

        let player = Player::new(Texture::new(TextureId(1), 64, 16), 4, 8.0)?;
        manager.create_sprite_at(player, Vec2::new(16.0, 100.0))?;

        for i in 0..COIN_COUNT {
            let strip = Texture::new(TextureId(2), 48, 8);
            let coin = coin_with_tag(AnimatedSprite::new(format!("coin_{i}"), strip, 6, 12.0)?);
            manager.create_sprite_at(coin, Vec2::new(60.0 + 40.0 * i as f32, 104.0))?;
        }

        let hud = Sprite::new("hud", Texture::new(TextureId(3), 320, 12))
            .with_tag("hud")
            .with_color(Color::rgba(0, 0, 0, 160))
            .with_depth(0.0)
            .with_draw_late(true);
        manager.create_sprite(hud)?;

        log::info!("Scene ready with {} sprites", manager.len());
        Ok(Self {
            manager,
            time: GameTime::new(),
            keyboard: KeyboardState::new(),
            recorder: CommandRecorder::new(),
            collected: 0,
        })
    }

    /// Scripted input: walk right, then down, then stand still
    fn script_input(&mut self, frame: u64) {
        match frame {
            0 => self.keyboard.press(KeyCode::D),
            90 => {
                self.keyboard.release(KeyCode::D);
                self.keyboard.press(KeyCode::S);
            }
            120 => self.keyboard.clear(),
            _ => {}
        }
    }

    fn collect_pickups(&mut self) {
        let Some(player) = self.manager.get("player") else {
            return;
        };
        let touched: Vec<String> = self
            .manager
            .sprites_with_tag("pickup")
            .into_iter()
            .filter(|coin| !coin.sprite().destroy_next_frame && player.collides_with(*coin))
            .map(|coin| coin.sprite().name().to_owned())
            .collect();

        for name in touched {
            if let Some(coin) = self.manager.get_mut(&name) {
                coin.sprite_mut().destroy_next_frame = true;
                self.collected += 1;
                log::info!("Collected {name} ({}/{COIN_COUNT})", self.collected);
            }
        }
    }

    fn run_frame(&mut self, frame: u64) -> Result<(), DemoError> {
        self.script_input(frame);
        self.time.advance(FRAME_TIME);

        let viewport = Vec2::new(VIEWPORT.0, VIEWPORT.1);
        let context = FrameContext::from_time(&self.time, viewport, &self.keyboard);
        let removed = self.manager.update(&context);
        if !removed.is_empty() {
            log::debug!("Removed {removed:?}");
        }
        self.collect_pickups();

        // Keep the player centred horizontally
        if let Some(player) = self.manager.get("player") {
            let x = player.sprite().position.x - VIEWPORT.0 / 2.0;
            self.manager.set_camera_position(Vec2::new(x.max(0.0), 0.0));
        }

        self.manager.draw(&mut self.recorder)?;
        for batch in self.recorder.take_batches() {
            log::trace!("Frame {frame}: {} draw commands", batch.commands.len());
        }

        if self.time.frame_count() % 30 == 0 {
            let frame_index = self
                .manager
                .get_as::<Player>("player")
                .map_or(0, Player::frame);
            log::info!(
                "t={:.2}s sprites={} collected={} player frame={} camera.x={:.1}",
                self.time.total().as_secs_f32(),
                self.manager.len(),
                self.collected,
                frame_index,
                self.manager.camera_position().x,
            );
        }
        Ok(())
    }

    fn run(&mut self) -> Result<(), DemoError> {
        for frame in 0..DEMO_FRAMES {
            self.run_frame(frame)?;
        }
        log::info!(
            "Demo finished after {} frames ({:.1} fps), {} of {COIN_COUNT} coins collected",
            self.time.frame_count(),
            self.time.average_fps(),
            self.collected,
        );
        Ok(())
    }
}

fn coin_with_tag(mut coin: AnimatedSprite) -> AnimatedSprite {
    coin.sprite_mut().set_tag("pickup");
    coin.sprite_mut().color = Color::YELLOW;
    coin
}

fn main() -> Result<(), DemoError> {
    logging::init();

    log::info!("Starting sprite demo");

    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading config from {path}");
            SpriteManagerConfig::load_from_file(&path)?
        }
        None => SpriteManagerConfig::default(),
    };

    let mut app = DemoApp::new(&config)?;
    app.run()
}
