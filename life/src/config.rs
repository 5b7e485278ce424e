// config.rs - Runtime configuration loaded from environment variables
//
// | Variable               | Default | Description                               |
// |------------------------|---------|-------------------------------------------|
// | `LIFE_LOG_LEVEL`       | `info`  | tracing filter (trace/debug/info/...)     |
// | `LIFE_RUNNING_FPS`     | `4`     | Ticks per second while the grid runs      |
// | `LIFE_IDLE_FPS`        | `60`    | Ticks per second in setup or when paused  |
// | `LIFE_CONCURRENT`      | `false` | Step rows as tokio tasks                  |
// | `LIFE_FULLSCREEN`      | `false` | Open the window fullscreen                |
// | `LIFE_PAUSE_ON_CYCLE`  | `false` | Pause when a generation repeats           |

use std::time::Duration;

use life_core::GameState;

const DEFAULT_RUNNING_FPS: u32 = 4;
const DEFAULT_IDLE_FPS: u32 = 60;

#[derive(Debug, Clone)]
pub struct Config {
    /// Tracing filter string, e.g. `"life_core=debug,info"`.
    pub log_level: String,
    pub running_fps: u32,
    pub idle_fps: u32,
    pub concurrent: bool,
    pub fullscreen: bool,
    pub pause_on_cycle: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            running_fps: DEFAULT_RUNNING_FPS,
            idle_fps: DEFAULT_IDLE_FPS,
            concurrent: false,
            fullscreen: false,
            pause_on_cycle: false,
        }
    }
}

impl Config {
    /// Applies defaults where a variable is absent or unparseable.
    pub fn from_env() -> Self {
        Self {
            log_level:      env_str("LIFE_LOG_LEVEL", "info"),
            running_fps:    env_fps("LIFE_RUNNING_FPS", DEFAULT_RUNNING_FPS),
            idle_fps:       env_fps("LIFE_IDLE_FPS", DEFAULT_IDLE_FPS),
            concurrent:     env_bool("LIFE_CONCURRENT", false),
            fullscreen:     env_bool("LIFE_FULLSCREEN", false),
            pause_on_cycle: env_bool("LIFE_PAUSE_ON_CYCLE", false),
        }
    }

    /// Time between ticks of the controller loop in the given state.
    pub fn tick_interval(&self, state: GameState) -> Duration {
        let fps = match state {
            GameState::Running                   => self.running_fps,
            GameState::Setup | GameState::Paused => self.idle_fps,
        };
        Duration::from_millis(1000 / u64::from(fps.max(1)))
    }
}

fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}

fn env_str(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_fps(key: &str, default: u32) -> u32 {
    match env_parse(key, default) {
        0 => default,
        fps => fps,
    }
}
