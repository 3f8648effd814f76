//! Editor facade: scene plus tool state machine behind one event entry point.

use crate::render::DrawList;
use crate::scene::Scene;
use crate::svg_renderer::render_svg;
use crate::tools::{ToolKind, ToolManager, ToolSignal};
use tracing::trace;
use wiregrid_core::{PointerEvent, PointerEventKind};
use wiregrid_settings::Config;

pub struct Editor {
    scene: Scene,
    tools: ToolManager,
    config: Config,
    elapsed: f64,
}

impl Editor {
    pub fn new(config: Config) -> Self {
        Self {
            scene: Scene::new(&config),
            tools: ToolManager::with_defaults(),
            config,
            elapsed: 0.0,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn tools(&self) -> &ToolManager {
        &self.tools
    }

    pub fn active_tool(&self) -> Option<ToolKind> {
        self.tools.active()
    }

    /// Feeds one pointer event through the tool state machine. The scene is
    /// hit-tested on pointer-down only.
    pub fn handle(&mut self, event: PointerEvent) -> Option<ToolSignal> {
        let hit = match event.kind {
            PointerEventKind::Down => self.scene.hit_test(&event.world),
            _ => None,
        };
        trace!("{} at ({}, {}) hit {:?}", event.kind, event.world.x, event.world.y, hit);
        self.tools.dispatch(&event, hit, &mut self.scene)
    }

    /// Advances the frame clock. Returns true when the scene changed since
    /// the previous tick.
    pub fn tick(&mut self, dt: f64) -> bool {
        self.elapsed += dt;
        self.scene.take_dirty()
    }

    /// Seconds accumulated by `tick`.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn draw_list(&self) -> DrawList {
        DrawList::from_scene(&self.scene)
    }

    pub fn render_svg(&self) -> String {
        render_svg(&self.draw_list())
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
