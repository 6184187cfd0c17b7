//! Static content banks.
//!
//! Read-only reference tables shared by every generator. They are plain
//! `'static` data: nothing mutates them at runtime, and generators receive
//! them by reference so alternative banks can be injected in tests.

/// A correctly spelled word with three plausible misspellings.
#[derive(Debug, Clone, Copy)]
pub struct SpellingEntry {
    pub correct: &'static str,
    pub misspellings: [&'static str; 3],
}

/// A sentence with three blanks; the first option of each blank is correct.
#[derive(Debug, Clone, Copy)]
pub struct ClozeEntry {
    pub sentence: &'static str,
    pub blanks: [[&'static str; 3]; 3],
}

/// Relationship tag used to draw analogy distractors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Antonym,
    PartWhole,
    ToolWorker,
    YoungAdult,
    Degree,
}

/// `a : b :: c : d`
#[derive(Debug, Clone, Copy)]
pub struct AnalogyEntry {
    pub a: &'static str,
    pub b: &'static str,
    pub c: &'static str,
    pub d: &'static str,
    pub relation: Relation,
}

/// Writing prompt with a pool of distinctive tokens (each at least six characters).
#[derive(Debug, Clone, Copy)]
pub struct WritingTopic {
    pub prompt: &'static str,
    pub tokens: &'static [&'static str],
}

/// Scene description with the details that actually appear in it and
/// prose distractors that misreport them.
#[derive(Debug, Clone, Copy)]
pub struct SceneEntry {
    pub scenario: &'static str,
    pub details: [&'static str; 3],
    pub distractors: [&'static str; 3],
}

/// Multiple-choice fact: prompt, correct answer, three wrong answers.
#[derive(Debug, Clone, Copy)]
pub struct ChoiceFact {
    pub prompt: &'static str,
    pub correct: &'static str,
    pub distractors: [&'static str; 3],
}

/// Every bank a generator may draw from.
///
/// Banks smaller than a section asks for yield a shorter section; an empty
/// bank yields no items of that kind.
#[derive(Debug)]
pub struct Banks {
    pub spelling: &'static [SpellingEntry],
    pub cloze: &'static [ClozeEntry],
    pub analogies: &'static [AnalogyEntry],
    pub microwrite_topics: &'static [WritingTopic],
    pub generative_topics: &'static [WritingTopic],
    pub scenes: &'static [SceneEntry],
    pub dimensional: &'static [ChoiceFact],
    pub causal: &'static [ChoiceFact],
    pub trace_words: &'static [&'static str],
}

impl Banks {
    /// The banks compiled into the binary.
    pub fn builtin() -> &'static Banks {
        &BUILTIN
    }
}

static BUILTIN: Banks = Banks {
    spelling: SPELLING,
    cloze: CLOZE,
    analogies: ANALOGIES,
    microwrite_topics: MICROWRITE_TOPICS,
    generative_topics: GENERATIVE_TOPICS,
    scenes: SCENES,
    dimensional: DIMENSIONAL,
    causal: CAUSAL,
    trace_words: TRACE_WORDS,
};

const fn sp(correct: &'static str, misspellings: [&'static str; 3]) -> SpellingEntry {
    SpellingEntry {
        correct,
        misspellings,
    }
}

static SPELLING: &[SpellingEntry] = &[
    sp("necessary", ["neccessary", "necesary", "nessecary"]),
    sp("accommodate", ["acommodate", "accomodate", "acomodate"]),
    sp("rhythm", ["rythm", "rhythym", "rhytm"]),
    sp("conscientious", ["consciencious", "conscientous", "concientious"]),
    sp("millennium", ["millenium", "milennium", "milenium"]),
    sp("definitely", ["definately", "definitly", "defenitely"]),
    sp("embarrass", ["embarass", "embarras", "emberrass"]),
    sp("occurrence", ["occurence", "ocurrence", "occurrance"]),
    sp("perseverance", ["perseverence", "perserverance", "persevearance"]),
    sp("questionnaire", ["questionaire", "questionnair", "questionnare"]),
    sp("separate", ["seperate", "separete", "seperete"]),
    sp("liaison", ["liason", "liasion", "liaision"]),
    sp("mischievous", ["mischievious", "mischevous", "mischeivous"]),
    sp("privilege", ["priviledge", "privelege", "privilage"]),
    sp("recommend", ["reccomend", "recomend", "reccommend"]),
    sp("threshold", ["threshhold", "treshold", "thresold"]),
];

static CLOZE: &[ClozeEntry] = &[
    ClozeEntry {
        sentence: "Although the results were ___, the committee ___ to publish them ___ further review.",
        blanks: [
            ["preliminary", "preliminarily", "preliminaries"],
            ["decided", "deciding", "decision"],
            ["pending", "pended", "pends"],
        ],
    },
    ClozeEntry {
        sentence: "Neither the manager nor the interns ___ aware that the deadline ___ been moved, ___ caused some confusion.",
        blanks: [
            ["were", "is", "be"],
            ["had", "have", "having"],
            ["which", "who", "whom"],
        ],
    },
    ClozeEntry {
        sentence: "The bridge, ___ was built in 1890, ___ renovated last year without ___ its historic facade.",
        blanks: [
            ["which", "who", "whom"],
            ["was", "were", "being"],
            ["altering", "alter", "altered"],
        ],
    },
    ClozeEntry {
        sentence: "If she ___ earlier, she ___ have caught the train that ___ at noon.",
        blanks: [
            ["had left", "has left", "leaves"],
            ["would", "will", "shall"],
            ["departed", "depart", "departing"],
        ],
    },
    ClozeEntry {
        sentence: "The samples ___ collected over ten years, and the findings ___ that temperatures have ___ steadily.",
        blanks: [
            ["were", "was", "been"],
            ["suggest", "suggests", "suggesting"],
            ["risen", "rose", "rising"],
        ],
    },
    ClozeEntry {
        sentence: "Each of the players ___ given a jersey, ___ they wore proudly ___ the final match.",
        blanks: [
            ["was", "be", "being"],
            ["which", "who", "whom"],
            ["during", "while", "whereas"],
        ],
    },
    ClozeEntry {
        sentence: "The professor, along with her students, ___ attending a conference ___ begins ___ Monday.",
        blanks: [
            ["is", "are", "be"],
            ["that", "who", "whom"],
            ["on", "at", "in"],
        ],
    },
];

const fn an(
    a: &'static str,
    b: &'static str,
    c: &'static str,
    d: &'static str,
    relation: Relation,
) -> AnalogyEntry {
    AnalogyEntry {
        a,
        b,
        c,
        d,
        relation,
    }
}

static ANALOGIES: &[AnalogyEntry] = &[
    an("hot", "cold", "tall", "short", Relation::Antonym),
    an("happy", "sad", "generous", "stingy", Relation::Antonym),
    an("ancient", "modern", "scarce", "abundant", Relation::Antonym),
    an("expand", "contract", "ascend", "descend", Relation::Antonym),
    an("petal", "flower", "page", "book", Relation::PartWhole),
    an("wheel", "car", "key", "keyboard", Relation::PartWhole),
    an("branch", "tree", "chapter", "novel", Relation::PartWhole),
    an("brick", "wall", "note", "melody", Relation::PartWhole),
    an("scalpel", "surgeon", "trowel", "mason", Relation::ToolWorker),
    an("brush", "painter", "baton", "conductor", Relation::ToolWorker),
    an("needle", "tailor", "chisel", "sculptor", Relation::ToolWorker),
    an("stethoscope", "doctor", "gavel", "judge", Relation::ToolWorker),
    an("puppy", "dog", "kitten", "cat", Relation::YoungAdult),
    an("foal", "horse", "calf", "cow", Relation::YoungAdult),
    an("cub", "bear", "gosling", "goose", Relation::YoungAdult),
    an("tadpole", "frog", "caterpillar", "butterfly", Relation::YoungAdult),
    an("warm", "hot", "cool", "cold", Relation::Degree),
    an("big", "enormous", "small", "tiny", Relation::Degree),
    an("damp", "soaked", "tired", "exhausted", Relation::Degree),
    an("like", "adore", "dislike", "loathe", Relation::Degree),
];

static MICROWRITE_TOPICS: &[WritingTopic] = &[
    WritingTopic {
        prompt: "Describe a time you changed your mind about something important.",
        tokens: &["evidence", "perspective", "decision", "reconsider", "opinion", "conversation"],
    },
    WritingTopic {
        prompt: "Explain how a small community could reduce its energy use.",
        tokens: &["community", "electricity", "insulation", "transport", "neighbors", "efficiency"],
    },
    WritingTopic {
        prompt: "Summarize the benefits and risks of remote work.",
        tokens: &["productivity", "isolation", "commute", "flexibility", "communication", "boundaries"],
    },
    WritingTopic {
        prompt: "Describe the journey of a package from warehouse to doorstep.",
        tokens: &["warehouse", "delivery", "tracking", "courier", "logistics", "doorstep"],
    },
    WritingTopic {
        prompt: "Argue for or against a four-day school week.",
        tokens: &["students", "learning", "schedule", "families", "teachers", "attendance"],
    },
    WritingTopic {
        prompt: "Explain why bees matter to agriculture.",
        tokens: &["pollination", "flowers", "harvest", "farmers", "colonies", "habitat"],
    },
];

static GENERATIVE_TOPICS: &[WritingTopic] = &[
    WritingTopic {
        prompt: "Write a short product announcement for a solar-powered bicycle lamp.",
        tokens: &["battery", "daylight", "commuters", "brightness", "sustainable", "charging"],
    },
    WritingTopic {
        prompt: "Write a letter to a city council proposing a new public library branch.",
        tokens: &["residents", "literacy", "funding", "neighborhood", "volunteers", "reading"],
    },
    WritingTopic {
        prompt: "Write a scene set in a lighthouse during a storm.",
        tokens: &["lantern", "thunder", "keeper", "shipwreck", "horizon", "shutters"],
    },
    WritingTopic {
        prompt: "Write instructions for planting a vegetable garden.",
        tokens: &["seedlings", "compost", "watering", "sunlight", "harvest", "spacing"],
    },
    WritingTopic {
        prompt: "Write a news brief about a newly discovered comet.",
        tokens: &["astronomers", "telescope", "orbital", "observatory", "trajectory", "nucleus"],
    },
    WritingTopic {
        prompt: "Write a museum placard describing an ancient clay tablet.",
        tokens: &["cuneiform", "merchants", "inscription", "archaeologists", "ancient", "records"],
    },
    WritingTopic {
        prompt: "Write a travel tip sheet for visiting a mountain village.",
        tokens: &["altitude", "hiking", "villagers", "weather", "lodging", "footwear"],
    },
    WritingTopic {
        prompt: "Write a short reflection on learning a musical instrument.",
        tokens: &["practice", "rhythm", "patience", "melody", "teacher", "improvement"],
    },
];

static SCENES: &[SceneEntry] = &[
    SceneEntry {
        scenario: "At the corner cafe, a woman in a green raincoat leans a blue umbrella against the counter, orders two espressos, and pays with a folded twenty-dollar bill while a radio plays jazz.",
        details: ["green raincoat", "two espressos", "paid with a twenty-dollar bill"],
        distractors: [
            "She wore a red coat, ordered a single espresso, and paid by card.",
            "A man in a green raincoat ordered tea and left his umbrella outside.",
            "The woman ordered two lattes and paid in coins while rock music played.",
        ],
    },
    SceneEntry {
        scenario: "On platform 4, the 7:42 express arrives three minutes late; a conductor with a red lanyard waves as a boy lets go of a yellow balloon that drifts toward the station clock.",
        details: ["platform 4", "conductor with a red lanyard", "yellow balloon"],
        distractors: [
            "The express arrived early on platform 2 while a girl held a red balloon.",
            "A conductor in a blue cap waved from platform 4 as the train left on time.",
            "The 7:24 local pulled in late and a boy chased a green kite.",
        ],
    },
    SceneEntry {
        scenario: "In a narrow kitchen, a chef slices six lemons on a wooden board, places a copper pot on the back-left burner, and sets a timer for eighteen minutes before wiping her hands on a striped towel.",
        details: ["six lemons", "copper pot on the back-left burner", "timer set for eighteen minutes"],
        distractors: [
            "The chef sliced four limes and set a timer for eight minutes.",
            "A steel pan sat on the front-right burner beside a plain white towel.",
            "The chef chopped onions on a marble slab and skipped the timer entirely.",
        ],
    },
    SceneEntry {
        scenario: "Near the fountain in the park, two children fly a kite shaped like a dragon while an elderly man feeds pigeons from a paper bag and a cyclist with a silver helmet rings her bell twice.",
        details: ["dragon-shaped kite", "pigeons fed from a paper bag", "cyclist rang her bell twice"],
        distractors: [
            "Three children flew a fish-shaped kite while a woman fed ducks.",
            "An old man threw bread to swans and a jogger in a red cap ran past.",
            "The cyclist wore a black helmet and rang her bell once near the gate.",
        ],
    },
    SceneEntry {
        scenario: "In the meeting room, a projector shows a bar chart with five bars, a laptop displays 14:05 in the corner, and someone has left a half-eaten apple next to a stack of three blue folders.",
        details: ["bar chart with five bars", "laptop clock showing 14:05", "three blue folders"],
        distractors: [
            "The projector showed a pie chart while the laptop read 15:40.",
            "A half-eaten banana sat beside two red folders on the table.",
            "The chart had seven bars and the folders were stacked on the floor.",
        ],
    },
];

static DIMENSIONAL: &[ChoiceFact] = &[
    ChoiceFact {
        prompt: "Using dimensional analysis, which SI base units describe force, the newton?",
        correct: "kg·m/s²",
        distractors: ["kg·m²/s²", "kg/(m·s²)", "kg·m/s"],
    },
    ChoiceFact {
        prompt: "Using dimensional analysis, which SI base units describe energy, the joule?",
        correct: "kg·m²/s²",
        distractors: ["kg·m/s²", "kg·m²/s³", "kg·m/s"],
    },
    ChoiceFact {
        prompt: "Using dimensional analysis, which SI base units describe power, the watt?",
        correct: "kg·m²/s³",
        distractors: ["kg·m²/s²", "kg·m/s³", "kg/s³"],
    },
    ChoiceFact {
        prompt: "Using dimensional analysis, which SI base units describe pressure, the pascal?",
        correct: "kg/(m·s²)",
        distractors: ["kg·m/s²", "kg/(m²·s)", "kg·m²/s²"],
    },
    ChoiceFact {
        prompt: "Using dimensional analysis, which SI base units describe linear momentum?",
        correct: "kg·m/s",
        distractors: ["kg·m/s²", "kg·m²/s", "kg/s"],
    },
    ChoiceFact {
        prompt: "If distance d is in metres and time t in seconds, which expression has units of acceleration?",
        correct: "2d/t²",
        distractors: ["d/t", "d·t", "d²/t"],
    },
];

static CAUSAL: &[ChoiceFact] = &[
    ChoiceFact {
        prompt: "A town installs more streetlights and burglaries fall the same year, while a similar town without new lights sees no change. What is the most defensible conclusion?",
        correct: "The lights may have contributed, but other local changes must be ruled out.",
        distractors: [
            "Streetlights certainly caused the drop in burglaries.",
            "Falling burglaries caused the town to install the lights.",
            "The other town proves that lighting has no effect at all.",
        ],
    },
    ChoiceFact {
        prompt: "Ice cream sales and drowning incidents both rise during the same summer months. Which explanation is most plausible?",
        correct: "Hot weather likely drives both trends.",
        distractors: [
            "Eating ice cream causes people to drown.",
            "Drowning incidents increase the demand for ice cream.",
            "The pattern must be pure coincidence with no common cause.",
        ],
    },
    ChoiceFact {
        prompt: "Fertilized plants grew taller than unfertilized ones, but the fertilized group was also kept nearer the window. Why is the result inconclusive?",
        correct: "Light exposure is a confounding variable.",
        distractors: [
            "The plants in the sample were already too tall.",
            "Fertilizer is known never to affect plant growth.",
            "Windows always block the light that plants need.",
        ],
    },
    ChoiceFact {
        prompt: "Patients who chose to take a new supplement reported feeling better than those who did not. Which design change best tests whether it works?",
        correct: "Randomly assign patients to supplement or placebo groups.",
        distractors: [
            "Ask the patients to rate the supplement more carefully.",
            "Give the supplement only to the healthiest patients.",
            "Double the dose for everyone who already chose it.",
        ],
    },
    ChoiceFact {
        prompt: "Cities with more hospitals record more deaths per year than cities with fewer hospitals. Which explanation is most plausible?",
        correct: "Larger populations need more hospitals and also have more deaths.",
        distractors: [
            "Hospitals make residents more likely to die.",
            "Each death prompts a new hospital to be built.",
            "Hospital counts and deaths cannot be related by definition.",
        ],
    },
    ChoiceFact {
        prompt: "Students who sleep more tend to earn higher grades in the same semester. Which statement is best supported by this observation?",
        correct: "Sleep and grades are associated; causation needs further evidence.",
        distractors: [
            "Higher grades are what make students sleep longer.",
            "Sleep alone determines a student's grades.",
            "There is no link between sleep and grades.",
        ],
    },
];

static TRACE_WORDS: &[&str] = &[
    "lantern", "harvest", "compass", "meadow", "quartz", "voyage", "cobalt", "signal", "pepper",
    "fjord", "glacier", "ember",
];
