use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumMessage, EnumString, IntoStaticStr};

use crate::core::{FrequencyTable, SampleView, Species};
use crate::estimation::{
    SampleSummary, asymptotic_shannon, asymptotic_simpson, coverage, sample_shannon,
    sample_simpson,
};
use crate::evaluation::Measurement;

/// Group of related measurements that can be switched on per profile.
///
/// Declaration order is the column order of exported tables.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    EnumIter,
    EnumString,
    Display,
    IntoStaticStr,
    EnumMessage,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum MetricFamily {
    #[strum(
        message = "Richness",
        detailed_message = "Observed species count and the Chao2 estimate (Hill number of order 0)."
    )]
    Richness,
    #[strum(
        message = "Shannon diversity",
        detailed_message = "Exponential of Shannon entropy, sample and asymptotic (order 1)."
    )]
    Shannon,
    #[strum(
        message = "Simpson diversity",
        detailed_message = "Inverse Simpson concentration, sample and asymptotic (order 2)."
    )]
    Simpson,
    #[strum(
        message = "Completeness",
        detailed_message = "Share of the estimated richness already observed (C0)."
    )]
    Completeness,
    #[strum(
        message = "Coverage",
        detailed_message = "Good-Turing-Chao sample coverage (C1)."
    )]
    Coverage,
}

/// Everything an evaluator may read about one view of one profile.
pub struct ViewContext<'a, S: Species> {
    pub view: SampleView,
    pub table: &'a FrequencyTable<S>,
    pub summary: SampleSummary,
    pub chao2: f64,
    pub completeness: f64,
}

pub type MetricEvaluator<S> = fn(&ViewContext<'_, S>, &mut Vec<Measurement>);

impl MetricFamily {
    pub fn suffixes(self) -> &'static [&'static str] {
        match self {
            MetricFamily::Richness => &["sample_d0", "estimate_d0"],
            MetricFamily::Shannon => &["sample_d1", "estimate_d1"],
            MetricFamily::Simpson => &["sample_d2", "estimate_d2"],
            MetricFamily::Completeness => &["c0"],
            MetricFamily::Coverage => &["c1"],
        }
    }

    pub fn columns(self, view: SampleView) -> impl Iterator<Item = String> {
        self.suffixes()
            .iter()
            .map(move |suffix| column(view, suffix))
    }

    /// Columns of both views, suffix by suffix, abundance first.
    pub fn all_columns(self) -> Vec<String> {
        interleave(
            self.columns(SampleView::Abundance).collect(),
            self.columns(SampleView::Incidence).collect(),
        )
    }

    pub fn evaluator<S: Species>(self) -> MetricEvaluator<S> {
        match self {
            MetricFamily::Richness => eval_richness::<S>,
            MetricFamily::Shannon => eval_shannon::<S>,
            MetricFamily::Simpson => eval_simpson::<S>,
            MetricFamily::Completeness => eval_completeness::<S>,
            MetricFamily::Coverage => eval_coverage::<S>,
        }
    }
}

pub(crate) fn interleave<T>(abundance: Vec<T>, incidence: Vec<T>) -> Vec<T> {
    abundance
        .into_iter()
        .zip(incidence)
        .flat_map(|(a, i)| [a, i])
        .collect()
}

fn column(view: SampleView, suffix: &str) -> String {
    format!("{}_{}", view.prefix(), suffix)
}

fn eval_richness<S: Species>(ctx: &ViewContext<'_, S>, out: &mut Vec<Measurement>) {
    out.push(Measurement::new(
        column(ctx.view, "sample_d0"),
        ctx.summary.observed as f64,
    ));
    out.push(Measurement::new(column(ctx.view, "estimate_d0"), ctx.chao2));
}

fn eval_shannon<S: Species>(ctx: &ViewContext<'_, S>, out: &mut Vec<Measurement>) {
    out.push(Measurement::new(
        column(ctx.view, "sample_d1"),
        sample_shannon(ctx.table, ctx.summary.species_total),
    ));
    out.push(Measurement::new(
        column(ctx.view, "estimate_d1"),
        asymptotic_shannon(ctx.table, ctx.view, &ctx.summary),
    ));
}

fn eval_simpson<S: Species>(ctx: &ViewContext<'_, S>, out: &mut Vec<Measurement>) {
    out.push(Measurement::new(
        column(ctx.view, "sample_d2"),
        sample_simpson(ctx.table, ctx.summary.species_total),
    ));
    out.push(Measurement::new(
        column(ctx.view, "estimate_d2"),
        asymptotic_simpson(ctx.table, ctx.view, &ctx.summary),
    ));
}

fn eval_completeness<S: Species>(ctx: &ViewContext<'_, S>, out: &mut Vec<Measurement>) {
    out.push(Measurement::new(column(ctx.view, "c0"), ctx.completeness));
}

fn eval_coverage<S: Species>(ctx: &ViewContext<'_, S>, out: &mut Vec<Measurement>) {
    let s = &ctx.summary;
    out.push(Measurement::new(
        column(ctx.view, "c1"),
        coverage(s.sample_size, s.singletons, s.doubletons, s.species_total),
    ));
}
