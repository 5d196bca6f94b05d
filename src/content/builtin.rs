use super::{Category, ContentCatalog, QuestionPair, WordItem};
use crate::types::Difficulty::{self, Easy, Hard, Medium};

fn word(word: &str, hint: &str, difficulty: Difficulty) -> WordItem {
    WordItem {
        word: word.to_string(),
        hint: hint.to_string(),
        difficulty,
    }
}

fn pair(main_question: &str, liar_question: &str, difficulty: Difficulty) -> QuestionPair {
    QuestionPair {
        main_question: main_question.to_string(),
        liar_question: liar_question.to_string(),
        difficulty,
    }
}

fn category(
    name: &str,
    icon: &str,
    words: Vec<WordItem>,
    question_pairs: Vec<QuestionPair>,
) -> Category {
    Category {
        name: name.to_string(),
        icon: icon.to_string(),
        words,
        question_pairs,
    }
}

pub(super) fn catalog() -> ContentCatalog {
    ContentCatalog::new(vec![
        category(
            "Animals",
            "pawprint.fill",
            vec![
                word("Dog", "Barks", Easy),
                word("Elephant", "Trunk", Easy),
                word("Penguin", "Tuxedo", Easy),
                word("Giraffe", "Long neck", Medium),
                word("Octopus", "Eight arms", Medium),
                word("Chameleon", "Changes color", Medium),
                word("Axolotl", "Smiling salamander", Hard),
                word("Pangolin", "Scaly anteater", Hard),
            ],
            vec![
                pair(
                    "What animal would make the best pet?",
                    "What animal would you least like to meet in the wild?",
                    Easy,
                ),
                pair(
                    "Which animal would win a race?",
                    "Which animal is the laziest?",
                    Medium,
                ),
                pair(
                    "What animal best matches your personality?",
                    "What animal would you want to be for a day?",
                    Hard,
                ),
            ],
        ),
        category(
            "Food",
            "fork.knife",
            vec![
                word("Pizza", "Slices", Easy),
                word("Ice Cream", "Cone", Easy),
                word("Banana", "Peel", Easy),
                word("Sushi", "Rice rolls", Medium),
                word("Pancake", "Flipped", Medium),
                word("Lasagna", "Layers", Medium),
                word("Kimchi", "Fermented", Hard),
                word("Croissant", "Flaky", Hard),
            ],
            vec![
                pair(
                    "What is your favorite breakfast?",
                    "What would you eat at midnight?",
                    Easy,
                ),
                pair(
                    "What food would you bring to a picnic?",
                    "What food would you serve at a wedding?",
                    Medium,
                ),
                pair(
                    "What dish reminds you of home?",
                    "What dish would you never order again?",
                    Hard,
                ),
            ],
        ),
        category(
            "Places",
            "map.fill",
            vec![
                word("Beach", "Sand", Easy),
                word("School", "Classes", Easy),
                word("Hospital", "Doctors", Easy),
                word("Airport", "Departures", Medium),
                word("Library", "Quiet", Medium),
                word("Casino", "Jackpot", Medium),
                word("Lighthouse", "Coast", Hard),
                word("Observatory", "Telescope", Hard),
            ],
            vec![
                pair(
                    "Where would you go on vacation?",
                    "Where would you go to hide?",
                    Easy,
                ),
                pair(
                    "Where would you spend a rainy day?",
                    "Where would you go on a first date?",
                    Medium,
                ),
                pair(
                    "Where would you like to live in ten years?",
                    "Where did you grow up?",
                    Hard,
                ),
            ],
        ),
        category(
            "Jobs",
            "briefcase.fill",
            vec![
                word("Teacher", "Classroom", Easy),
                word("Chef", "Kitchen", Easy),
                word("Firefighter", "Hose", Easy),
                word("Pilot", "Cockpit", Medium),
                word("Dentist", "Teeth", Medium),
                word("Lawyer", "Courtroom", Medium),
                word("Sommelier", "Wine", Hard),
                word("Cartographer", "Maps", Hard),
            ],
            vec![
                pair(
                    "What job would you love to have?",
                    "What job would you hate to have?",
                    Easy,
                ),
                pair(
                    "What job pays too little?",
                    "What job pays too much?",
                    Medium,
                ),
                pair(
                    "What job would you be secretly great at?",
                    "What job did you want as a child?",
                    Hard,
                ),
            ],
        ),
        category(
            "Sports",
            "sportscourt.fill",
            vec![
                word("Soccer", "Goal", Easy),
                word("Tennis", "Racket", Easy),
                word("Swimming", "Pool", Easy),
                word("Golf", "Hole in one", Medium),
                word("Boxing", "Gloves", Medium),
                word("Skiing", "Slopes", Medium),
                word("Curling", "Broom", Hard),
                word("Fencing", "Foil", Hard),
            ],
            vec![
                pair(
                    "What sport is the most fun to watch?",
                    "What sport is the most boring to watch?",
                    Easy,
                ),
                pair(
                    "What sport would you try at the Olympics?",
                    "What sport has the best uniforms?",
                    Medium,
                ),
                pair(
                    "What sport takes the most skill?",
                    "What sport is the most dangerous?",
                    Hard,
                ),
            ],
        ),
    ])
}
