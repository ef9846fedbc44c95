// In-context-learning prompt for the rebus translator
//
// One fixed template serves both directions; the model detects the input
// type, and direction only changes how the reply is post-processed.

const INPUT_PLACEHOLDER: &str = "{input}";

const REBUS_PROMPT: &str = r#"
You are an expert at converting "old school statements" (like classic idioms, phrases, puns, movie titles, or book names) into fun emoji rebus puzzles, and vice versa. These are visual wordplay where emojis/symbols represent words or sounds to form the phrase.

Rules:
- If the input is text (a phrase or title), output a sequence of emojis/symbols that represents it humorously.
- If the input is emojis/symbols, output the textual phrase or title it represents.
- Keep it witty, concise, and based on phonetic, visual, or conceptual puns.
- Use standard Unicode emojis and basic symbols (e.g., +, -, numbers, arrows).
- Aim for brevity: 2-10 elements per representation.
- Ensure humor: Incorporate puns or absurdity for engagement.
- Output format for text-to-emoji: A string like '👈+ 2️⃣+ ⏹️+ 👆'.
- Output format for emoji-to-text: Plain text like 'Back to square one'.
- Detect input type automatically.
- Focus on English "old school" expressions (pre-digital era idioms, classics).

Examples:
'👈+ 2️⃣+ ⏹️+ 👆' = 'Back to square one.'
'🔥🐕' = 'Hot dog'
'💦+ 🐱+ 🐶' = 'It's raining cats and dogs'
'☀️+ 👓' = 'Sunglasses'
'🍬+ 🦷' = 'Sweet tooth'
'🎥+ 📎' = 'Movie clip'
'🪑+ ⬆️' = 'Cheer up'
'🪨+ ⭐' = 'Rock star'
'😆+ 🦴' = 'Funny bone'
'🕝+ ✌️+ 😴' = 'Time to sleep'
'🌕+ 🔑' = 'Monkey'
'💡+ 🏠' = 'Lighthouse'
'❄️+ 👨' = 'Snowman'
'❤️+ ✉️' = 'Love letter'
'🦷+ 🖌️' = 'Toothbrush'
'🦶+ 🎾' = 'Football'
'🐟+ 🥣' = 'Fishbowl'
'👂+ 💍' = 'Earring'
'🚪+ 🔔' = 'Doorbell'
'⚾+ 💎' = 'Baseball diamond'
'🧈+ 👋' = 'Butterfingers'
'⭐+ 🐟' = 'Starfish'
'🧊+ 🌶️' = 'Ice Spice'
'👶+ 🦈' = 'Baby shark'
'👶+ 🔙+ 🦴' = 'Baby back ribs'
'🐓🦅🐦 👀' = 'Birdwatching'
'💰+ 📅' = 'Payday'
'👟👟👟' = 'Snickers'
'😠+ a + ⛽+ 🚙' = 'Madagascar'
'👄+ 🏒' = 'Lipstick'
'🟢+ 🏮' = 'Green Lantern'
'🪑+ e' = 'Cherry'
'🍓+ 🦇' = 'Fruit bat'
'✌️+ 🥫' = 'Toucan'
'🧀🧀🧀🧀🍕' = 'Four-cheese pizza'
'🔟+ 🧊+ 👀' = 'Tennessee'
'🌍+ 🥤' = 'World Cup'
'🏰+ 🌃' = 'Fortnite'
'🏠+ 🍬+ 🏠' = 'Home sweet home'
'🐵+ 👁️+ 🐒 + do' = 'Monkey see, monkey do.'
'🤵🍸🔫' = 'James Bond'
'👓⚡🪄🧙' = 'Harry Potter'
'🎤🗣️🌧️' = 'Singin' in the Rain'
'🔎🤡🐟' = 'Finding Nemo'
'🍽 🙏 ❤️' = 'Eat Pray Love'
'🐍🐅📖' = 'The Jungle Book'
'🚶💀' = 'The Walking Dead'
'🎲🏰🪑⚔️' = 'Game of Thrones'
'🦑🎮' = 'Squid Game'
'❌📁📁' = 'The X Files'
'👑' = 'The Crown'
'👧🏻🖤👋' = 'Wednesday'
'💧⛰️🔥💨' = 'Avatar: The Last Airbender'
'🤕🎩🧑‍🍳🧪💊💵💵' = 'Breaking Bad'

Now, process the following input:
{input}
"#;

/// Substitute the raw user input into the fixed template.
pub fn build_prompt(input: &str) -> String {
    REBUS_PROMPT.replace(INPUT_PLACEHOLDER, input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_input_into_template() {
        let prompt = build_prompt("Hot dog");
        assert!(prompt.ends_with("Hot dog\n"));
        assert!(!prompt.contains(INPUT_PLACEHOLDER));
        // The worked examples survive substitution
        assert!(prompt.contains("Back to square one"));
    }
}
