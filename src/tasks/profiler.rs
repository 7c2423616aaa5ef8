use std::collections::HashMap;

use log::{debug, info, trace, warn};
use rayon::prelude::*;

use crate::core::{Accumulator, SampleView, Species};
use crate::error::ProfileError;
use crate::evaluation::{DiversityCurve, DiversityEvaluator, MetricTable, ProfileConfig, Snapshot};

/// Species extraction function: the possibly repeated species of one observation.
pub type SpeciesFn<O, S> = Box<dyn Fn(&O) -> Vec<S> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileState {
    Empty,
    Accumulating,
    Snapshotted,
    /// Closed by the final snapshot of `apply`; further observations reopen it.
    Finalized,
}

struct Profile<O, S: Species> {
    name: String,
    retrieve: SpeciesFn<O, S>,
    accumulator: Accumulator<S>,
    evaluator: DiversityEvaluator,
    curve: DiversityCurve,
    state: ProfileState,
}

impl<O, S: Species + Sync> Profile<O, S> {
    fn new(name: String, retrieve: SpeciesFn<O, S>, config: ProfileConfig) -> Self {
        let evaluator = DiversityEvaluator::new(config);
        let curve = DiversityCurve::new(evaluator.measurement_columns());
        Self {
            name,
            retrieve,
            accumulator: Accumulator::new(),
            evaluator,
            curve,
            state: ProfileState::Empty,
        }
    }

    fn observe(&mut self, observation: &O) -> Result<(), ProfileError> {
        let species = (self.retrieve)(observation);
        self.accumulator.update(&species);
        self.state = ProfileState::Accumulating;

        let seen = self.accumulator.sample_size(SampleView::Incidence);
        trace!(
            "profile '{}': observation {} yielded {} species",
            self.name,
            seen,
            species.len()
        );

        if let Some(step) = self.evaluator.config().step_size {
            if seen % step == 0 {
                self.take_snapshot()?;
            }
        }
        Ok(())
    }

    fn take_snapshot(&mut self) -> Result<&Snapshot, ProfileError> {
        if self.accumulator.table(SampleView::Abundance).is_empty() {
            warn!(
                "profile '{}': snapshot before any species was observed",
                self.name
            );
        }
        let snapshot = self.evaluator.evaluate(&self.accumulator)?;
        debug!("profile '{}': {}", self.name, snapshot);
        self.curve.push(snapshot);
        self.state = ProfileState::Snapshotted;
        // just pushed
        Ok(&self.curve.snapshots()[self.curve.len() - 1])
    }

    fn finalize(&mut self) -> Result<(), ProfileError> {
        self.take_snapshot()?;
        self.state = ProfileState::Finalized;
        info!(
            "profile '{}' finalized after {} observations ({} snapshots)",
            self.name,
            self.accumulator.sample_size(SampleView::Incidence),
            self.curve.len()
        );
        Ok(())
    }
}

/// Runs named species-extraction pipelines ("profiles") over a stream of
/// observations and records their diversity and completeness over time.
pub struct Profiler<O, S: Species> {
    config: ProfileConfig,
    profiles: Vec<Profile<O, S>>,
    index: HashMap<String, usize>,
}

impl<O, S: Species + Send + Sync> Profiler<O, S> {
    pub fn new() -> Self {
        Self {
            config: ProfileConfig::default(),
            profiles: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn with_config(config: ProfileConfig) -> Result<Self, ProfileError> {
        config.validate()?;
        Ok(Self {
            config,
            profiles: Vec::new(),
            index: HashMap::new(),
        })
    }

    pub fn config(&self) -> &ProfileConfig {
        &self.config
    }

    pub fn register<N, F>(&mut self, name: N, retrieve: F) -> Result<(), ProfileError>
    where
        N: Into<String>,
        F: Fn(&O) -> Vec<S> + Send + Sync + 'static,
    {
        let config = self.config.clone();
        self.register_with_config(name, retrieve, config)
    }

    pub fn register_with_config<N, F>(
        &mut self,
        name: N,
        retrieve: F,
        config: ProfileConfig,
    ) -> Result<(), ProfileError>
    where
        N: Into<String>,
        F: Fn(&O) -> Vec<S> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(ProfileError::DuplicateProfile(name));
        }
        config.validate()?;

        info!(
            "registering profile '{}' (metrics: {:?}, step size: {:?})",
            name, config.metrics, config.step_size
        );
        self.index.insert(name.clone(), self.profiles.len());
        self.profiles.push(Profile::new(name, Box::new(retrieve), config));
        Ok(())
    }

    /// Feeds one observation to every profile, in registration order.
    pub fn add_observation(&mut self, observation: &O) -> Result<(), ProfileError> {
        for profile in &mut self.profiles {
            profile.observe(observation)?;
        }
        Ok(())
    }

    /// Consumes a whole stream, then snapshots every profile once more.
    pub fn apply<'a, I>(&mut self, observations: I) -> Result<(), ProfileError>
    where
        I: IntoIterator<Item = &'a O>,
        O: 'a,
    {
        for observation in observations {
            self.add_observation(observation)?;
        }
        for profile in &mut self.profiles {
            profile.finalize()?;
        }
        Ok(())
    }

    /// Same as [`Profiler::apply`], with profiles processed in parallel.
    pub fn apply_par(&mut self, observations: &[O]) -> Result<(), ProfileError>
    where
        O: Sync,
    {
        self.profiles.par_iter_mut().try_for_each(|profile| {
            for observation in observations {
                profile.observe(observation)?;
            }
            profile.finalize()
        })
    }

    pub fn snapshot(&mut self, name: &str) -> Result<&Snapshot, ProfileError> {
        let idx = self.position(name)?;
        self.profiles[idx].take_snapshot()
    }

    pub fn snapshot_all(&mut self) -> Result<(), ProfileError> {
        for profile in &mut self.profiles {
            profile.take_snapshot()?;
        }
        Ok(())
    }

    /// One row per snapshot taken so far.
    pub fn export(&self, name: &str) -> Result<MetricTable, ProfileError> {
        Ok(self.curve(name)?.to_table())
    }

    pub fn export_all(&self) -> Vec<(String, MetricTable)> {
        self.profiles
            .iter()
            .map(|p| (p.name.clone(), p.curve.to_table()))
            .collect()
    }

    pub fn curve(&self, name: &str) -> Result<&DiversityCurve, ProfileError> {
        Ok(&self.profiles[self.position(name)?].curve)
    }

    pub fn accumulator(&self, name: &str) -> Result<&Accumulator<S>, ProfileError> {
        Ok(&self.profiles[self.position(name)?].accumulator)
    }

    pub fn state(&self, name: &str) -> Result<ProfileState, ProfileError> {
        Ok(self.profiles[self.position(name)?].state)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(|p| p.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    fn position(&self, name: &str) -> Result<usize, ProfileError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| ProfileError::UnknownProfile(name.to_string()))
    }
}

impl<O, S: Species + Send + Sync> Default for Profiler<O, S> {
    fn default() -> Self {
        Self::new()
    }
}
