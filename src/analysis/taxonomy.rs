//! The static registry of what this engine can recognize: test categories
//! with their lexical and structural cues, motion-expectation profiles for
//! the categories that produce visible movement, and the demeanor lexicon.
//!
//! All pattern rules are compiled and validated at load. The registry is an
//! immutable value constructed once at startup and passed by reference;
//! classification stays a pure function of (text, timestamp, registry).

use regex::{Regex, RegexBuilder};
use serde::Serialize;

use super::AnalysisError;

/// The physical actions a test category should visually produce, used as the
/// basis for comparison against observed video evidence.
#[derive(Debug, Clone, Serialize)]
pub struct MotionExpectation {
    pub expected_movements: Vec<String>,
    pub patient_motion_required: bool,
    pub examiner_touch: bool,
    pub description: String,
}

impl MotionExpectation {
    fn new(
        expected_movements: &[&str],
        patient_motion_required: bool,
        examiner_touch: bool,
        description: &str,
    ) -> Self {
        Self {
            expected_movements: expected_movements.iter().map(|s| s.to_string()).collect(),
            patient_motion_required,
            examiner_touch,
            description: description.to_string(),
        }
    }
}

/// One recognizable test category: keyword cues, compiled pattern rules, and
/// (for categories with a visible physical component) a motion profile.
#[derive(Debug, Clone)]
pub struct TestCategory {
    pub id: String,
    pub keywords: Vec<String>,
    patterns: Vec<Regex>,
    pub motion: Option<MotionExpectation>,
}

impl TestCategory {
    /// Compile a category from raw cue lists, validating every pattern rule.
    pub fn compile(
        id: &str,
        keywords: &[&str],
        patterns: &[&str],
        motion: Option<MotionExpectation>,
    ) -> Result<Self, AnalysisError> {
        Ok(Self {
            id: id.to_string(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            patterns: compile_patterns(id, patterns)?,
            motion,
        })
    }

    /// True when any structural pattern rule matches the text.
    pub fn matches_structurally(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(text))
    }
}

/// Fixed indicator tables for the demeanor analyzer.
#[derive(Debug, Clone)]
pub struct DemeanorLexicon {
    /// Exact-substring negative-tone phrases (matched against lowercased text).
    pub negative_tone_phrases: Vec<String>,
    dismissive: Vec<Regex>,
    aggressive: Vec<Regex>,
}

impl DemeanorLexicon {
    pub fn dismissive_patterns(&self) -> &[Regex] {
        &self.dismissive
    }

    pub fn aggressive_patterns(&self) -> &[Regex] {
        &self.aggressive
    }

    fn standard() -> Result<Self, AnalysisError> {
        let negative_tone_phrases = [
            "that's ridiculous",
            "you're lying",
            "i don't believe",
            "that's impossible",
            "come on",
            "really?",
            "seriously?",
            "you're exaggerating",
            "that doesn't make sense",
        ];

        let dismissive = [
            r"(?:doesn't|does\s+not)\s+matter",
            r"not\s+important",
            r"(?:don't|do\s+not)\s+care\s+about",
            r"that's\s+(?:irrelevant|not\s+relevant)",
        ];

        let aggressive = [
            r"stop\s+(?:talking|speaking)",
            r"let\s+me\s+(?:speak|talk)",
            r"don't\s+(?:interrupt|talk)",
            r"be\s+quiet",
            r"shut\s+up",
        ];

        Ok(Self {
            negative_tone_phrases: negative_tone_phrases.iter().map(|s| s.to_string()).collect(),
            dismissive: compile_patterns("demeanor_dismissive", &dismissive)?,
            aggressive: compile_patterns("demeanor_aggressive", &aggressive)?,
        })
    }
}

/// The complete immutable registry.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    categories: Vec<TestCategory>,
    demeanor: DemeanorLexicon,
    declaration_phrases: Vec<String>,
}

impl Taxonomy {
    /// Assemble a registry from pre-compiled categories, using the standard
    /// demeanor lexicon and declaration phrases.
    pub fn new(categories: Vec<TestCategory>) -> Result<Self, AnalysisError> {
        Ok(Self {
            categories,
            demeanor: DemeanorLexicon::standard()?,
            declaration_phrases: DECLARATION_PHRASES.iter().map(|s| s.to_string()).collect(),
        })
    }

    pub fn categories(&self) -> &[TestCategory] {
        &self.categories
    }

    pub fn category(&self, id: &str) -> Option<&TestCategory> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn demeanor(&self) -> &DemeanorLexicon {
        &self.demeanor
    }

    pub fn declaration_phrases(&self) -> &[String] {
        &self.declaration_phrases
    }

    /// The shipped registry: ten orthopedic/neurological/cognitive exam
    /// categories, with motion profiles for the seven that produce visible
    /// movement on camera.
    pub fn standard() -> Result<Self, AnalysisError> {
        let categories = vec![
            TestCategory::compile(
                "spine",
                &["spine", "spinal", "vertebra", "vertebrae", "back"],
                &[
                    r"check\s+(?:the\s+)?spine",
                    r"examine\s+(?:the\s+)?back",
                    r"spinal\s+(?:examination|assessment)",
                ],
                Some(MotionExpectation::new(
                    &["examiner_hand_movement", "visual_inspection"],
                    false,
                    true,
                    "Examiner inspects and palpates spine",
                )),
            )?,
            TestCategory::compile(
                "lumbar_rom",
                &[
                    "lumbar",
                    "lower back",
                    "range of motion",
                    "rom",
                    "flexion",
                    "extension",
                    "bend forward",
                    "bend backward",
                ],
                &[
                    r"(?:lumbar|lower\s+back)\s+range\s+of\s+motion",
                    r"(?:forward|backward)\s+(?:flexion|bending)",
                    r"rom\s+test",
                ],
                Some(MotionExpectation::new(
                    &["forward_bend", "backward_bend", "lateral_bend", "rotation"],
                    true,
                    false,
                    "Patient should bend forward, backward, and side-to-side",
                )),
            )?,
            TestCategory::compile(
                "straight_leg_raise",
                &[
                    "straight leg",
                    "slr",
                    "leg raise",
                    "lasegue",
                    "raise your leg",
                ],
                &[
                    r"straight\s+leg\s+(?:raise|test)",
                    r"slr\s+test",
                    r"lasegue['s]*\s+(?:test|sign)",
                ],
                Some(MotionExpectation::new(
                    &["leg_raise", "hip_flexion"],
                    true,
                    true,
                    "Examiner raises patient's leg while patient lies supine",
                )),
            )?,
            TestCategory::compile(
                "waddells_signs",
                &["waddell", "non-organic", "behavioral", "non organic"],
                &[
                    r"waddell['s]*\s+(?:signs|test)",
                    r"non[-\s]organic\s+(?:signs|findings)",
                ],
                None,
            )?,
            TestCategory::compile(
                "cervical_rom",
                &[
                    "cervical",
                    "neck",
                    "rotation",
                    "lateral flexion",
                    "turn your head",
                    "neck movement",
                ],
                &[
                    r"cervical\s+(?:range\s+of\s+motion|rom)",
                    r"neck\s+(?:rotation|flexion|movement)",
                    r"turn\s+(?:your\s+)?head",
                ],
                Some(MotionExpectation::new(
                    &["head_rotation", "head_flexion", "head_extension"],
                    true,
                    false,
                    "Patient rotates and flexes neck in various directions",
                )),
            )?,
            TestCategory::compile(
                "gait",
                &[
                    "gait",
                    "walking",
                    "ambulation",
                    "mobility",
                    "walk",
                    "heel-to-toe",
                    "tandem",
                ],
                &[
                    r"gait\s+(?:analysis|assessment|test)",
                    r"(?:walk|walking)\s+(?:test|assessment)",
                    r"heel[-\s]to[-\s]toe",
                    r"tandem\s+(?:walk|gait)",
                ],
                Some(MotionExpectation::new(
                    &["walking", "heel_to_toe", "standing"],
                    true,
                    false,
                    "Patient walks normally and performs heel-to-toe walking",
                )),
            )?,
            TestCategory::compile(
                "neurological",
                &[
                    "reflex",
                    "reflexes",
                    "sensation",
                    "sensory",
                    "motor",
                    "strength",
                    "muscle strength",
                    "patellar",
                    "achilles",
                ],
                &[
                    r"(?:reflex|reflexes)\s+test",
                    r"(?:sensory|sensation)\s+(?:test|examination)",
                    r"motor\s+(?:strength|function)",
                    r"(?:patellar|achilles|bicep|tricep)\s+reflex",
                ],
                Some(MotionExpectation::new(
                    &["limb_movement", "reflex_test"],
                    false,
                    true,
                    "Examiner tests reflexes using reflex hammer",
                )),
            )?,
            TestCategory::compile(
                "palpation",
                &[
                    "palpate",
                    "palpating",
                    "feel",
                    "touch",
                    "tender",
                    "tenderness",
                    "press",
                ],
                &[
                    r"(?:palpate|palpating)\s+(?:the\s+)?(?:spine|back|neck|area)",
                    r"check\s+for\s+tenderness",
                    r"feel\s+(?:the\s+)?(?:spine|muscles)",
                ],
                Some(MotionExpectation::new(
                    &["examiner_hand_movement"],
                    false,
                    true,
                    "Examiner presses along spine or affected area",
                )),
            )?,
            TestCategory::compile(
                "orthopedic",
                &[
                    "orthopedic",
                    "musculoskeletal",
                    "joint",
                    "hip",
                    "knee",
                    "shoulder",
                    "ankle",
                ],
                &[
                    r"orthopedic\s+(?:examination|assessment|test)",
                    r"(?:hip|knee|shoulder|ankle)\s+(?:test|examination)",
                    r"joint\s+(?:mobility|function)",
                ],
                None,
            )?,
            TestCategory::compile(
                "cognitive",
                &[
                    "memory",
                    "concentration",
                    "cognitive",
                    "mental status",
                    "orientation",
                    "recall",
                ],
                &[
                    r"cognitive\s+(?:test|assessment|function)",
                    r"mental\s+status\s+exam",
                    r"memory\s+test",
                    r"orientation\s+(?:test|assessment)",
                ],
                None,
            )?,
        ];

        Self::new(categories)
    }
}

/// Transition phrases that mark a spoken declaration of intent. A bonus
/// signal only — generic enough that they mean nothing without a category cue.
const DECLARATION_PHRASES: &[&str] = &[
    "now we",
    "let's",
    "going to",
    "want to",
    "need to",
    "i'm going to",
    "i'm checking",
    "i need",
    "we're going to",
];

fn compile_patterns(category: &str, raw: &[&str]) -> Result<Vec<Regex>, AnalysisError> {
    raw.iter()
        .map(|pattern| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| AnalysisError::InvalidPattern {
                    category: category.to_string(),
                    pattern: (*pattern).to_string(),
                    source: e,
                })
        })
        .collect()
}
