pub const DEFAULT_WIDTH: i32 = 1280;          // Initial window width
pub const DEFAULT_HEIGHT: i32 = 720;          // Initial window height
pub const FPS: u32 = 60;                      // Default frames per second

pub const CARD_COUNT: usize = 3;              // Cards, background layers and caption blocks per ring

// --- Layout ---
pub const CARD_HEIGHT: f32 = 0.58;            // Current card height as a fraction of the window height
pub const CARD_ASPECT: f32 = 0.68;            // Card width / height
pub const CARD_CENTER_Y: f32 = 0.42;          // Card vertical centre as a fraction of the window height
pub const SIDE_CARD_SHIFT: f32 = 0.24;        // Horizontal distance of previous/next cards from the centre
pub const SIDE_CARD_SCALE: f32 = 0.8;
pub const SIDE_CARD_BRIGHTNESS: f32 = 0.55;
pub const BACKGROUND_BRIGHTNESS: f32 = 0.45;
pub const CAPTION_TOP: f32 = 0.78;            // Caption block top as a fraction of the window height
pub const TITLE_FONT_SIZE: i32 = 36;
pub const TEXT_FONT_SIZE: i32 = 20;
pub const CONTROL_RADIUS: f32 = 26.0;

// --- Stacking ---
pub const Z_CURRENT_CARD: i32 = 50;
pub const Z_DEPARTING_CARD: i32 = 30;         // Card that just left the centre
pub const Z_WRAPPING_CARD: i32 = 20;          // Card that wraps to the far side
pub const Z_CURRENT_BACKGROUND: i32 = -1;
pub const Z_DEPARTING_BACKGROUND: i32 = -2;
pub const Z_HIDDEN_BACKGROUND: i32 = -3;

// --- Swap timeline (seconds) ---
pub const CONTROL_FADE_DURATION: f32 = 0.2;
pub const CONTROL_DISABLED_OPACITY: f32 = 0.5;
pub const TEXT_FADE_DURATION: f32 = 0.4;
pub const TEXT_STAGGER: f32 = 0.1;
pub const TEXT_EXIT_OFFSET: f32 = -120.0;     // Pixels the outgoing caption text rises
pub const TEXT_ENTER_OFFSET: f32 = 40.0;      // Pixels below rest the incoming caption text starts
pub const CARD_TRANSITION: f32 = 0.6;         // Card/background slide between role poses

// --- Startup timeline (seconds) ---
pub const LOADER_FADE_DURATION: f32 = 0.8;
pub const PROGRESS_TWEEN_DURATION: f32 = 1.0;
pub const PROGRESS_MAX_HUE: f32 = 120.0;      // Red at 0% through green at 100%
pub const CARD_RISE_DELAY: f32 = 0.15;
pub const CARD_RISE_DURATION: f32 = 0.5;
pub const CARD_RISE_SPREAD: f32 = 0.1;
pub const CARD_START_OFFSET: f32 = 1.0;       // Cards start a full window height below rest
pub const INTRO_TEXT_DELAY: f32 = 0.5;
pub const INTRO_CONTROLS_DURATION: f32 = 0.4;

// --- Pointer tilt ---
pub const TILT_FACTOR: f32 = 35.0;            // Degrees per pi radians
