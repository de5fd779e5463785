/*!
 * Offline advisory handler.
 *
 * Answers with general, location-independent guidance. Categories that need
 * live data (weather, market prices) have nothing reliable to say offline and
 * report no data, so the router falls back instead of guessing.
 */

use async_trait::async_trait;

use crate::classification::IntentCategory;
use crate::errors::HandlerError;

use super::{DomainHandler, HandlerResponse};

/// Confidence attached to general guidance
const GENERAL_GUIDANCE_CONFIDENCE: f64 = 0.6;

const CROP_GUIDANCE: &str = "Choose crops suited to the season: rice, cotton and maize for kharif, \
wheat, mustard and gram for rabi. Test your soil before sowing and use certified seed. \
For better results contact your nearest Krishi Vigyan Kendra for soil testing and variety advice.";

const IRRIGATION_GUIDANCE: &str = "Irrigate early in the morning or late in the evening to reduce evaporation. \
Water when the soil feels dry 5-10 cm below the surface or leaves wilt at midday. \
Drip irrigation and mulching save water; avoid over-irrigation to prevent root disease.";

const PEST_GUIDANCE: &str = "Inspect the underside of leaves for insects and spots, and remove badly affected plants. \
Neem-based organic pesticides control many common pests. Always read pesticide labels and follow the dosage. \
Contact your local agriculture officer to confirm the diagnosis.";

const FINANCE_GUIDANCE: &str = "Major schemes: PM-KISAN income support of Rs 6000 per year, Kisan Credit Card loans, \
and crop insurance under PM Fasal Bima Yojana. Visit your bank or local agriculture office, \
or call the Kisan Call Center at 1800-180-1551.";

/// Handler with built-in general guidance and no network access
#[derive(Debug, Clone, Default)]
pub struct OfflineAdvisoryHandler;

impl OfflineAdvisoryHandler {
    /// Create a new offline handler
    pub fn new() -> Self {
        Self
    }

    /// Categories this handler has guidance for
    pub fn covered() -> &'static [IntentCategory] {
        &[
            IntentCategory::Crop,
            IntentCategory::Irrigation,
            IntentCategory::Pest,
            IntentCategory::Finance,
        ]
    }
}

#[async_trait]
impl DomainHandler for OfflineAdvisoryHandler {
    fn name(&self) -> &str {
        "offline_advisory"
    }

    async fn invoke(
        &self,
        category: IntentCategory,
        _pivot_text: &str,
        _location_hint: Option<&str>,
    ) -> Result<HandlerResponse, HandlerError> {
        let guidance = match category {
            IntentCategory::Crop => CROP_GUIDANCE,
            IntentCategory::Irrigation => IRRIGATION_GUIDANCE,
            IntentCategory::Pest => PEST_GUIDANCE,
            IntentCategory::Finance => FINANCE_GUIDANCE,
            IntentCategory::Weather | IntentCategory::Market => {
                return Err(HandlerError::NoData(format!("live {} data is not available offline", category)));
            }
            IntentCategory::Unclassified => return Err(HandlerError::NotRegistered(category)),
        };

        Ok(HandlerResponse::new(
            category,
            guidance,
            self.name(),
            GENERAL_GUIDANCE_CONFIDENCE,
        ))
    }
}
