use crate::domain::model::Priest;
use crate::utils::error::{BookingError, Result};
use std::collections::BTreeSet;

pub const EXPERIENCE_PRESETS: [&str; 5] = ["any", "5", "10", "20", "30"];
pub const RATING_PRESETS: [&str; 4] = ["any", "4", "4.5", "4.8"];

/// 下拉選單的「全部」選項等同未設定
fn is_unset(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") || trimmed.eq_ignore_ascii_case("any")
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub search: String,
    pub language: Option<String>,
    pub min_experience: Option<u32>,
    pub min_rating: Option<f32>,
}

impl FilterState {
    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
    }

    pub fn set_language(&mut self, raw: &str) {
        self.language = if is_unset(raw) {
            None
        } else {
            Some(raw.to_string())
        };
    }

    pub fn set_min_experience(&mut self, raw: &str) -> Result<()> {
        if is_unset(raw) {
            self.min_experience = None;
            return Ok(());
        }
        let years = raw.trim().parse::<u32>().map_err(|_| {
            BookingError::validation("experience", format!("'{}' is not a whole number of years", raw))
        })?;
        self.min_experience = Some(years);
        Ok(())
    }

    pub fn set_min_rating(&mut self, raw: &str) -> Result<()> {
        if is_unset(raw) {
            self.min_rating = None;
            return Ok(());
        }
        let rating = raw
            .trim()
            .parse::<f32>()
            .ok()
            .filter(|r| (0.0..=5.0).contains(r))
            .ok_or_else(|| {
                BookingError::validation("rating", format!("'{}' is not a rating between 0 and 5", raw))
            })?;
        self.min_rating = Some(rating);
        Ok(())
    }

    /// 四個條件一次清空
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn has_active_filters(&self) -> bool {
        !self.search.is_empty()
            || self.language.is_some()
            || self.min_experience.is_some()
            || self.min_rating.is_some()
    }

    pub fn matches(&self, priest: &Priest) -> bool {
        if !self.search.is_empty()
            && !priest
                .name
                .to_lowercase()
                .contains(&self.search.to_lowercase())
        {
            return false;
        }

        if let Some(language) = &self.language {
            if !priest.speaks(language) {
                return false;
            }
        }

        if let Some(min_experience) = self.min_experience {
            if priest.experience < min_experience {
                return false;
            }
        }

        if let Some(min_rating) = self.min_rating {
            if priest.rating < min_rating {
                return false;
            }
        }

        true
    }
}

/// 保持原本順序，只做篩選
pub fn filter_priests<'a>(priests: &'a [Priest], filters: &FilterState) -> Vec<&'a Priest> {
    let filtered: Vec<&Priest> = priests.iter().filter(|p| filters.matches(p)).collect();
    tracing::debug!(
        "Filtered priests: {} of {} match {:?}",
        filtered.len(),
        priests.len(),
        filters
    );
    filtered
}

pub fn available_languages(priests: &[Priest]) -> BTreeSet<String> {
    priests
        .iter()
        .flat_map(|priest| priest.languages.iter().cloned())
        .collect()
}
