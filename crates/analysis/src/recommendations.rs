//! Recommendation blocks for predicted conditions.

use panel_data::ReferenceCatalog;
use serde::Serialize;

const NORMAL_LABEL: &str = "Normal";

const GENERAL_TITLE: &str = "General Health";
const GENERAL_ITEMS: [&str; 2] = [
    "No specific recommendations needed as all values are normal",
    "Maintain a balanced diet and regular exercise",
];

/// A titled block of advice.
///
/// Condition blocks carry the condition, model confidence and description;
/// the generic block only has a title and items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    pub items: Vec<&'static str>,
}

impl Recommendation {
    pub fn general() -> Self {
        Self {
            title: GENERAL_TITLE.to_string(),
            condition: None,
            confidence: None,
            description: None,
            items: GENERAL_ITEMS.to_vec(),
        }
    }

    pub fn is_general(&self) -> bool {
        self.condition.is_none()
    }
}

/// Capitalize the first letter of every word, lowercase the rest.
///
/// A word starts at any letter not preceded by a letter, so
/// "vitamin B12 deficiency" becomes "Vitamin B12 Deficiency".
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

/// One block per predicted condition found in the abnormality catalog.
///
/// `Normal` and uncatalogued labels are skipped. When nothing qualifies the
/// result is the single generic block.
pub fn generate_recommendations<'a, I>(catalog: &ReferenceCatalog, predictions: I) -> Vec<Recommendation>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut recommendations: Vec<Recommendation> = predictions
        .into_iter()
        .filter(|(label, _)| *label != NORMAL_LABEL)
        .filter_map(|(label, confidence)| {
            let abnormality = catalog.get_abnormality(label)?;
            Some(Recommendation {
                title: format!("For {}", title_case(label)),
                condition: Some(label.to_string()),
                confidence: Some(confidence),
                description: Some(abnormality.description),
                items: abnormality.recommendations.to_vec(),
            })
        })
        .collect();

    if recommendations.is_empty() {
        recommendations.push(Recommendation::general());
    }
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> &'static ReferenceCatalog {
        ReferenceCatalog::standard()
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("Iron deficiency anemia"), "Iron Deficiency Anemia");
        assert_eq!(title_case("Vitamin B12 deficiency"), "Vitamin B12 Deficiency");
    }

    #[test]
    fn test_one_block_per_catalogued_condition() {
        let recs = generate_recommendations(
            catalog(),
            [("Anemia", 97.0), ("Made-up condition", 99.0), ("Thalassemia", 92.5)],
        );
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].title, "For Anemia");
        assert_eq!(recs[0].confidence, Some(97.0));
        assert_eq!(recs[0].items.len(), 4);
        assert_eq!(recs[1].condition.as_deref(), Some("Thalassemia"));
    }

    #[test]
    fn test_normal_gets_general_block() {
        let recs = generate_recommendations(catalog(), [("Normal", 100.0)]);
        assert_eq!(recs, vec![Recommendation::general()]);
    }

    #[test]
    fn test_nothing_catalogued_gets_general_block() {
        let recs = generate_recommendations(catalog(), std::iter::empty());
        assert_eq!(recs.len(), 1);
        assert!(recs[0].is_general());

        let recs = generate_recommendations(catalog(), [("Polycythemia", 95.0)]);
        assert_eq!(recs, vec![Recommendation::general()]);
    }

    #[test]
    fn test_general_block_shape() {
        let json = serde_json::to_value(Recommendation::general()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "General Health",
                "items": [
                    "No specific recommendations needed as all values are normal",
                    "Maintain a balanced diet and regular exercise"
                ]
            })
        );
    }
}
