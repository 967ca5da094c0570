//! System prompts for the three conversational tones.
//!
//! Each prompt instructs the model to detect emotions from the fixed
//! vocabulary and respond with a strict JSON object:
//! `{ "emotions": [...], "reply": "..." }`.

use solace_types::emotion::Emotion;
use solace_types::tone::Tone;

/// Persona line and reply-style line for one tone.
struct ToneVoice {
    persona: &'static str,
    instruction: &'static str,
    style: &'static str,
}

fn voice(tone: Tone) -> ToneVoice {
    match tone {
        Tone::Therapist => ToneVoice {
            persona: "You are a professional and clinical mental health therapist. You provide evidence-based, therapeutic responses.",
            instruction: "Then respond with clinical insight and therapeutic techniques to help them.",
            style: "Keep your reply professional and clinical.",
        },
        Tone::Cheerful => ToneVoice {
            persona: "You are an upbeat and encouraging mental health companion. You provide positive, energizing responses.",
            instruction: "Then respond with enthusiasm and positive energy to lift their spirits.",
            style: "Keep your reply upbeat and encouraging.",
        },
        Tone::Supportive => ToneVoice {
            persona: "You are a warm and understanding mental health companion. You provide gentle, supportive responses.",
            instruction: "Then respond with warmth and understanding to comfort them.",
            style: "Keep your reply warm and understanding.",
        },
    }
}

/// The emotion vocabulary as it appears inside the prompts.
fn vocabulary_list() -> String {
    let labels: Vec<&str> = Emotion::ALL.iter().map(|e| e.label()).collect();
    format!("[{}]", labels.join(", "))
}

/// Build the system instruction for a tone.
pub fn system_prompt(tone: Tone) -> String {
    let voice = voice(tone);
    format!(
        r#"{persona}
When the user sends a message, first detect the emotions they are experiencing from the list:
{vocabulary}.

{instruction}
IMPORTANT: You must respond ONLY with valid JSON in this exact format:
{{
  "emotions": ["emotion1", "emotion2"],
  "reply": "Your response here"
}}

Do not include any text before or after the JSON. {style}"#,
        persona = voice.persona,
        vocabulary = vocabulary_list(),
        instruction = voice.instruction,
        style = voice.style,
    )
}
