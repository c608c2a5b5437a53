//! Analysis service: generate, cache and invalidate per-symbol analyses.

use std::sync::Arc;

use async_trait::async_trait;
use log::warn;

use stockpulse_ai::{build_analysis_prompt, parse_analysis, CompletionModel};

use super::model::StockAnalysis;
use super::traits::AnalysisRepositoryTrait;
use crate::cache::Clock;
use crate::constants::analysis_validity;
use crate::errors::{Error, Result};
use crate::settings::SettingsServiceTrait;

/// Service trait for AI stock analysis.
#[async_trait]
pub trait AnalysisServiceTrait: Send + Sync {
    /// Analysis for a symbol. Serves the stored one while it is within its
    /// validity window, otherwise regenerates; on generation failure an
    /// expired stored analysis is served rather than erroring.
    async fn get_analysis(
        &self,
        symbol: &str,
        company_name: &str,
        force_refresh: bool,
    ) -> Result<StockAnalysis>;

    /// Drop the stored analysis so the next read regenerates it.
    async fn invalidate(&self, symbol: &str) -> Result<()>;
}

pub struct AnalysisService {
    model: Arc<dyn CompletionModel>,
    repository: Arc<dyn AnalysisRepositoryTrait>,
    settings: Arc<dyn SettingsServiceTrait>,
    clock: Arc<dyn Clock>,
}

impl AnalysisService {
    pub fn new(
        model: Arc<dyn CompletionModel>,
        repository: Arc<dyn AnalysisRepositoryTrait>,
        settings: Arc<dyn SettingsServiceTrait>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            model,
            repository,
            settings,
            clock,
        }
    }

    async fn generate(&self, symbol: &str, company_name: &str) -> Result<StockAnalysis> {
        let prompt = build_analysis_prompt(symbol, company_name);
        let reply = self.model.complete(&prompt).await.map_err(Error::from)?;
        let generated = parse_analysis(&reply);

        let now = self.clock.now();
        Ok(StockAnalysis::from_generated(
            symbol,
            generated,
            now,
            now + analysis_validity(),
        ))
    }
}

#[async_trait]
impl AnalysisServiceTrait for AnalysisService {
    async fn get_analysis(
        &self,
        symbol: &str,
        company_name: &str,
        force_refresh: bool,
    ) -> Result<StockAnalysis> {
        if self.settings.ai_api_key()?.trim().is_empty() {
            return Err(Error::MissingApiKey("AI".to_string()));
        }

        let stored = self.repository.get(symbol)?;

        if !force_refresh {
            if let Some(analysis) = &stored {
                if analysis.is_valid_at(self.clock.now()) {
                    return Ok(analysis.clone());
                }
            }
        }

        match self.generate(symbol, company_name).await {
            Ok(analysis) => {
                if let Err(err) = self.repository.upsert(analysis.clone()).await {
                    warn!("failed to store analysis for {}: {}", symbol, err);
                }
                Ok(analysis)
            }
            Err(err) => {
                if let Some(analysis) = stored {
                    warn!(
                        "serving expired analysis for {} after generation failure: {}",
                        symbol, err
                    );
                    return Ok(analysis);
                }
                Err(err)
            }
        }
    }

    async fn invalidate(&self, symbol: &str) -> Result<()> {
        self.repository.delete(symbol).await
    }
}
