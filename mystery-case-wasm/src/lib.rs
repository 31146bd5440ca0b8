//! WASM bindings for mystery-case: powers the browser version of the game.

use wasm_bindgen::prelude::*;

use mystery_case::core::case::Case;
use mystery_case::schema::location::Location;
use mystery_case::schema::traits::TraitCategory;

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------

/// A suspect as the player sees it: traits, but not guilt.
#[derive(serde::Serialize)]
struct SuspectInfo {
    index: usize,
    traits: Vec<(String, String)>,
    house_searchable: bool,
}

#[derive(serde::Serialize)]
struct ClueInfo {
    location: String,
    description: String,
}

#[derive(serde::Serialize)]
struct AccusationResult {
    correct: bool,
    culprit: Option<usize>,
}

/// Generate a case and return it as JSON, solution included.
#[wasm_bindgen]
pub fn generate_case(seed: Option<u64>) -> Result<String, JsError> {
    let case = Case::new(seed);
    serde_json::to_string(&case).map_err(|e| JsError::new(&format!("Serialization error: {e}")))
}

// ---------------------------------------------------------------------------
// CaseDemo: one game in progress
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct CaseDemo {
    case: Case,
    accusations: u32,
}

#[wasm_bindgen]
impl CaseDemo {
    /// Start a game. Without a seed one is drawn at random.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u64>) -> CaseDemo {
        CaseDemo {
            case: Case::new(seed),
            accusations: 0,
        }
    }

    /// The seed that reproduces this game.
    pub fn seed(&self) -> u64 {
        self.case.seed()
    }

    /// JSON array of suspects without the guilty flag.
    pub fn suspects(&self) -> Result<String, JsError> {
        let env = self.case.environment();
        let suspects: Vec<SuspectInfo> = self
            .case
            .suspects()
            .iter()
            .map(|s| SuspectInfo {
                index: s.index(),
                traits: TraitCategory::ALL
                    .iter()
                    .map(|c| (c.name().to_string(), s.trait_value(*c).label().to_string()))
                    .collect(),
                house_searchable: env.can_inspect_house(s.index()),
            })
            .collect();
        serde_json::to_string(&suspects)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// JSON array of location tags the player may visit for evidence.
    pub fn inspectable_locations(&self) -> String {
        let env = self.case.environment();
        let tags: Vec<&str> = Location::ALL
            .into_iter()
            .filter(|l| env.can_inspect(*l))
            .map(|l| l.tag())
            .collect();
        serde_json::to_string(&tags).unwrap_or_else(|_| "[]".to_string())
    }

    /// Inspect a location by tag (e.g. "cctv"). Returns a JSON array of the
    /// clues found there.
    pub fn inspect(&self, location: &str) -> Result<String, JsError> {
        let location = Location::from_tag(location)
            .ok_or_else(|| JsError::new(&format!("Unknown location: {location}")))?;
        if !self.case.environment().can_inspect(location) {
            return Err(JsError::new(&format!(
                "Nothing to inspect at {}",
                location.tag()
            )));
        }
        let found: Vec<ClueInfo> = self
            .case
            .clues()
            .clues
            .iter()
            .filter(|c| c.template.location == location)
            .map(|c| ClueInfo {
                location: location.tag().to_string(),
                description: format!("{} ({})", c.template.description, c.fact),
            })
            .collect();
        serde_json::to_string(&found)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// True when the traits alone do not settle the case and alibis must be
    /// checked.
    pub fn needs_alibi(&self) -> bool {
        self.case.clues().needs_alibi()
    }

    /// Accuse a suspect. Returns JSON `{ correct, culprit }`; the culprit is
    /// only revealed once the accusation is right.
    pub fn check_accusation(&mut self, index: usize) -> Result<String, JsError> {
        if index >= self.case.suspects().len() {
            return Err(JsError::new(&format!("No suspect #{index}")));
        }
        self.accusations += 1;
        let correct = self.case.is_culprit(index);
        let result = AccusationResult {
            correct,
            culprit: correct.then_some(index),
        };
        serde_json::to_string(&result)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Number of accusations made so far.
    pub fn accusations(&self) -> u32 {
        self.accusations
    }

    /// Full case as JSON, solution included.
    pub fn reveal(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.case)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Start over with a new seed.
    pub fn reset(&mut self, seed: Option<u64>) {
        self.case = Case::new(seed);
        self.accusations = 0;
    }
}
