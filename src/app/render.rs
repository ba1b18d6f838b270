use crate::core::state::{LookupState, Phase};
use crate::domain::model::CountryProfile;

/// Groups the integer digits in threes with commas: `67391582` → `67,391,582`.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Area with grouped thousands and at most three decimals, trailing zeros dropped.
pub fn format_area(area: f64) -> String {
    let rounded = (area.max(0.0) * 1000.0).round() / 1000.0;
    let whole = rounded.trunc() as u64;
    let fraction = format!("{:.3}", rounded - rounded.trunc());
    let fraction = fraction
        .trim_start_matches('0')
        .trim_end_matches('0')
        .trim_end_matches('.');

    if fraction.is_empty() {
        format_thousands(whole)
    } else {
        format!("{}{}", format_thousands(whole), fraction)
    }
}

pub fn render_profile(profile: &CountryProfile) -> String {
    let lines = [
        format!("== {} ({}) ==", profile.name, profile.code),
        format!("Bandera: {}", profile.flag_url),
        format!("Capital: {}", profile.capital.as_deref().unwrap_or("-")),
        format!("Región: {}", profile.region),
        format!("Subregión: {}", profile.subregion),
        format!("Población: {}", format_thousands(profile.population)),
        format!("Área: {} km²", format_area(profile.area_km2)),
    ];
    lines.join("\n")
}

pub fn render_state(state: &LookupState) -> String {
    let mut sections = Vec::new();

    match state.phase {
        Phase::Searching => sections.push(format!("Buscando '{}'...", state.query)),
        Phase::NeighborsLoading => sections.push("Cargando países vecinos...".to_string()),
        _ => {}
    }

    if let Some(error) = &state.error {
        sections.push(error.clone());
    }

    if let Some(primary) = &state.primary {
        let mut card = render_profile(primary);
        if !state.neighbors.is_empty() {
            card.push_str("\nPaíses vecinos:");
            for neighbor in &state.neighbors {
                let marker = if state.selected.as_deref() == Some(neighbor.code.as_str()) {
                    "*"
                } else {
                    " "
                };
                card.push_str(&format!("\n {} {} {}", marker, neighbor.code, neighbor.name));
            }
        }
        sections.push(card);
    }

    if let Some(selected) = state.selected_neighbor() {
        sections.push(render_profile(selected));
    }

    sections.join("\n\n")
}
