//! Dashboard State
//!
//! Holds what the page displays: the loading flag, asset metadata, the
//! normalized series and the selected period. The history is loaded by a
//! single explicit `init` call; changing the period only recomputes ticks.

use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use super::error::DashboardError;
use crate::series::{normalize, AssetInfo, Period, Prepared, Series};
use crate::source::SeriesSource;

/// Point-in-time copy of the dashboard state
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardState {
    pub loading: bool,
    pub chart_info: Option<AssetInfo>,
    pub data: Option<Series>,
    pub period: Period,
}

impl DashboardState {
    /// Ticks for the current period, empty until data is loaded
    pub fn ticks(&self) -> Vec<i64> {
        self.data
            .as_ref()
            .map(|series| series.ticks(self.period))
            .unwrap_or_default()
    }

    /// Derive the render view
    pub fn view(self) -> DashboardView {
        let ticks = self.ticks();
        DashboardView {
            loading: self.loading,
            info: self.chart_info,
            data: self.data,
            period: self.period,
            ticks,
        }
    }
}

/// Everything a renderer needs, ticks included
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardView {
    pub loading: bool,
    pub info: Option<AssetInfo>,
    pub data: Option<Series>,
    pub period: Period,
    pub ticks: Vec<i64>,
}

struct Loaded {
    chart_info: Option<AssetInfo>,
    data: Option<Series>,
    period: Period,
}

/// Clears the loading flag when dropped, on every exit path
struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn engage(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Shared dashboard state
pub struct Dashboard {
    loaded: RwLock<Loaded>,
    loading: AtomicBool,
    initialized: AtomicBool,
}

impl Dashboard {
    pub fn new(period: Period) -> Self {
        Self {
            loaded: RwLock::new(Loaded {
                chart_info: None,
                data: None,
                period,
            }),
            loading: AtomicBool::new(false),
            initialized: AtomicBool::new(false),
        }
    }

    /// Load the history once
    ///
    /// On failure the error is logged and returned; the chart info and data
    /// stay empty so the page falls back to an empty chart.
    pub async fn init(&self, source: &dyn SeriesSource) -> Result<(), DashboardError> {
        if self.initialized.swap(true, Ordering::SeqCst) {
            tracing::warn!("Dashboard already initialized, skipping fetch");
            return Err(DashboardError::AlreadyInitialized);
        }

        let _loading = LoadingGuard::engage(&self.loading);
        tracing::info!(source = %source.describe(), "Loading asset history");

        match load(source).await {
            Ok(prepared) => {
                let mut loaded = self.loaded.write().await;
                tracing::info!(
                    farm = %prepared.info.farm,
                    asset = %prepared.info.asset,
                    points = prepared.data.len(),
                    "Dashboard ready"
                );
                loaded.chart_info = Some(prepared.info);
                loaded.data = Some(prepared.data);
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load asset history");
                Err(e)
            }
        }
    }

    /// Change the lookback window; never refetches
    pub async fn select_period(&self, period: Period) {
        let mut loaded = self.loaded.write().await;
        if loaded.period != period {
            tracing::debug!(from = %loaded.period, to = %period, "Period selected");
            loaded.period = period;
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    pub async fn snapshot(&self) -> DashboardState {
        let loaded = self.loaded.read().await;
        DashboardState {
            loading: self.is_loading(),
            chart_info: loaded.chart_info.clone(),
            data: loaded.data.clone(),
            period: loaded.period,
        }
    }

    pub async fn view(&self) -> DashboardView {
        self.snapshot().await.view()
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(Period::default())
    }
}

async fn load(source: &dyn SeriesSource) -> Result<Prepared, DashboardError> {
    let raw = source.fetch().await?;
    Ok(normalize(&raw)?)
}
