use aviary_core::{Flock, FlockConfig, Vector2D, Viewport, Wanderer, WandererConfig};
use aviary_shared::{BirdStyle, FlockSettings, FrameSnapshot};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

fn to_js<E: core::fmt::Display>(err: E) -> JsValue {
    let message = err.to_string();
    web_sys::console::warn_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

/// Flock handle owned by the page's animation loop.
///
/// The page calls `advance` from its `requestAnimationFrame` callback and
/// reads positions and headings back to place the bird glyphs. Dropping the
/// handle when the overlay unmounts discards the simulation.
#[wasm_bindgen]
pub struct AviaryFlock {
    flock: Flock,
    frame: u64,
    viewport: Viewport,
}

#[wasm_bindgen]
impl AviaryFlock {
    /// `count` defaults to a random size in 20..=30; `seed` makes the spawn reproducible.
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: f32,
        height: f32,
        count: Option<u32>,
        seed: Option<f64>,
    ) -> Result<AviaryFlock, JsValue> {
        let config = FlockConfig::default();
        let flock = match (count, seed) {
            (Some(count), Some(seed)) => {
                Flock::seeded(count as usize, width, height, config, seed as u64)
            }
            (None, Some(seed)) => Flock::seeded_random_count(width, height, config, seed as u64),
            (Some(count), None) => Flock::new(count as usize, width, height),
            (None, None) => Flock::with_random_count(width, height),
        }
        .map_err(to_js)?;

        console_log!(
            "Initializing bird overlay with {} birds in {}x{}",
            flock.len(),
            width,
            height
        );

        Ok(AviaryFlock {
            flock,
            frame: 0,
            viewport: Viewport::new(width, height),
        })
    }

    /// One animation frame with the pointer at (`pointer_x`, `pointer_y`).
    pub fn advance(
        &mut self,
        pointer_x: f32,
        pointer_y: f32,
        width: f32,
        height: f32,
    ) -> Result<(), JsValue> {
        self.step(Some(Vector2D::new(pointer_x, pointer_y)), width, height)
    }

    /// One animation frame while the pointer is outside the page.
    #[wasm_bindgen(js_name = advanceWithoutPointer)]
    pub fn advance_without_pointer(&mut self, width: f32, height: f32) -> Result<(), JsValue> {
        self.step(None, width, height)
    }

    fn step(&mut self, pointer: Option<Vector2D>, width: f32, height: f32) -> Result<(), JsValue> {
        let viewport = Viewport::new(width, height);
        self.flock.advance(pointer, viewport).map_err(to_js)?;
        self.viewport = viewport;
        self.frame += 1;
        Ok(())
    }

    /// Interleaved `[x0, y0, x1, y1, ...]`.
    pub fn positions(&self) -> js_sys::Float32Array {
        let flat: Vec<f32> = self
            .flock
            .boids()
            .iter()
            .flat_map(|b| [b.position.x, b.position.y])
            .collect();
        js_sys::Float32Array::from(flat.as_slice())
    }

    /// Heading of each bird in degrees, in the same order as `positions`.
    pub fn headings(&self) -> js_sys::Float32Array {
        let headings: Vec<f32> = self
            .flock
            .boids()
            .iter()
            .map(|b| b.heading_degrees())
            .collect();
        js_sys::Float32Array::from(headings.as_slice())
    }

    pub fn ids(&self) -> Vec<u32> {
        self.flock.boids().iter().map(|b| b.id).collect()
    }

    pub fn len(&self) -> usize {
        self.flock.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flock.is_empty()
    }

    pub fn frame(&self) -> f64 {
        self.frame as f64
    }

    /// Applies a JSON settings object; omitted fields take their defaults.
    #[wasm_bindgen(js_name = setSettings)]
    pub fn set_settings(&mut self, json: &str) -> Result<(), JsValue> {
        let settings = FlockSettings::from_json(json).map_err(to_js)?;
        self.flock.set_config(settings.into()).map_err(to_js)?;
        console_log!("Updated flock settings");
        Ok(())
    }

    pub fn settings(&self) -> Result<String, JsValue> {
        FlockSettings::from(*self.flock.config())
            .to_json()
            .map_err(to_js)
    }

    /// Current frame as JSON, for renderers that prefer a single object.
    pub fn snapshot(&self) -> Result<String, JsValue> {
        FrameSnapshot::capture(self.frame, self.viewport, self.flock.boids())
            .to_json()
            .map_err(to_js)
    }
}

/// CSS colour for the bird with the given id.
#[wasm_bindgen(js_name = birdColor)]
pub fn bird_color(id: u32) -> String {
    BirdStyle::for_id(id).css()
}

/// The single meandering bird of the older overlay.
#[wasm_bindgen]
pub struct AviaryWanderer {
    bird: Wanderer,
}

#[wasm_bindgen]
impl AviaryWanderer {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, seed: Option<f64>) -> Result<AviaryWanderer, JsValue> {
        let seed = seed.unwrap_or_else(|| js_sys::Math::random() * u32::MAX as f64) as u64;
        let bird = Wanderer::seeded(Viewport::new(width, height), WandererConfig::default(), seed)
            .map_err(to_js)?;
        Ok(AviaryWanderer { bird })
    }

    pub fn advance(
        &mut self,
        pointer_x: f32,
        pointer_y: f32,
        width: f32,
        height: f32,
    ) -> Result<(), JsValue> {
        self.bird
            .advance(
                Some(Vector2D::new(pointer_x, pointer_y)),
                Viewport::new(width, height),
            )
            .map(|_| ())
            .map_err(to_js)
    }

    pub fn x(&self) -> f32 {
        self.bird.position.x
    }

    pub fn y(&self) -> f32 {
        self.bird.position.y
    }

    pub fn heading(&self) -> f32 {
        self.bird.heading_degrees()
    }
}
