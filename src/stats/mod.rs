//! Stats module - headline metrics and chart series

mod calculator;

pub use calculator::{
    format_count, DashboardStats, HeadlineMetrics, StateCount, StatsCalculator, TrendSeries,
};
