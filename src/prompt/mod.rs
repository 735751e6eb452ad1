// src/prompt/mod.rs

use crate::model::SymptomReport;

/// Persona and scope for every diagnosis request.
pub const SYSTEM_INSTRUCTION: &str = r#"You are a Senior Diesel Technician at Majeed Diesel Lab (established 1970, Delphi & Phinia certified, operating Hartridge ISO-standard OEM benches).
Analyze the user's reported diesel engine symptoms.
Focus on potential issues with the Fuel Injection System (Pumps, Injectors, Common Rail).
Provide 3 likely technical causes.
Keep the tone professional, industrial, and authoritative.
ALWAYS end by recommending they bring the vehicle to Majeed Diesel Lab for a definitive test on the Hartridge CRI-Pro machine.
Do not provide definitive repair instructions, only diagnostic possibilities."#;

/// The two texts sent upstream for one report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComposedPrompt {
    pub system_instruction: String,
    pub user_turn: String,
}

pub fn compose(report: &SymptomReport) -> ComposedPrompt {
    ComposedPrompt {
        system_instruction: SYSTEM_INSTRUCTION.to_string(),
        user_turn: format!("Symptoms: {}", report.as_str()),
    }
}
