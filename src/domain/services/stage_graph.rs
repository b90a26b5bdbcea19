//! Stage graph
//!
//! The pipeline's ordering as an explicit DAG: each stage declares what it
//! consumes and produces, and the orchestrator runs a validated topological
//! order instead of relying on scattered dependency edges.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::Serialize;

use crate::error::{BridgeError, BridgeResult};

/// A pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Scan,
    GenerateHeaders,
    CompileManaged,
    CompileNative,
    Package,
    Run,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Scan => "scan",
            Stage::GenerateHeaders => "generate-headers",
            Stage::CompileManaged => "compile-managed",
            Stage::CompileNative => "compile-native",
            Stage::Package => "package",
            Stage::Run => "run",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data handed from one stage to another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StageArtifact {
    Declarations,
    Headers,
    ManagedClasses,
    NativeLibrary,
    PackagedLibrary,
}

/// A stage with its declared inputs and outputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSpec {
    pub stage: Stage,
    pub inputs: Vec<StageArtifact>,
    pub outputs: Vec<StageArtifact>,
}

impl StageSpec {
    pub fn new(stage: Stage, inputs: &[StageArtifact], outputs: &[StageArtifact]) -> Self {
        Self {
            stage,
            inputs: inputs.to_vec(),
            outputs: outputs.to_vec(),
        }
    }
}

/// A validated, acyclic stage graph
#[derive(Debug, Clone)]
pub struct StageGraph {
    specs: Vec<StageSpec>,
    /// stage -> stages producing its inputs
    deps: HashMap<Stage, Vec<Stage>>,
    order: Vec<Stage>,
}

impl StageGraph {
    /// The bridge pipeline
    pub fn standard() -> Self {
        use StageArtifact::*;
        let specs = vec![
            StageSpec::new(Stage::Scan, &[], &[Declarations]),
            StageSpec::new(Stage::GenerateHeaders, &[Declarations], &[Headers]),
            StageSpec::new(Stage::CompileManaged, &[Headers], &[ManagedClasses]),
            StageSpec::new(Stage::CompileNative, &[Headers], &[NativeLibrary]),
            StageSpec::new(Stage::Package, &[NativeLibrary], &[PackagedLibrary]),
            StageSpec::new(Stage::Run, &[PackagedLibrary, ManagedClasses], &[]),
        ];
        match Self::new(specs) {
            Ok(graph) => graph,
            Err(e) => unreachable!("standard stage graph is invalid: {}", e),
        }
    }

    /// Validate and order a graph.
    ///
    /// Every input must be produced by exactly one stage and the graph must be acyclic.
    /// Ties in the topological order are broken by declaration order.
    pub fn new(specs: Vec<StageSpec>) -> BridgeResult<Self> {
        let mut producer: HashMap<StageArtifact, Stage> = HashMap::new();
        let mut seen = BTreeSet::new();
        for spec in &specs {
            if !seen.insert(spec.stage) {
                return Err(invalid(format!("stage '{}' declared twice", spec.stage)));
            }
            for out in &spec.outputs {
                if let Some(other) = producer.insert(*out, spec.stage) {
                    return Err(invalid(format!(
                        "{:?} produced by both '{}' and '{}'",
                        out, other, spec.stage
                    )));
                }
            }
        }

        let mut deps: HashMap<Stage, Vec<Stage>> = HashMap::new();
        for spec in &specs {
            let mut stage_deps = Vec::new();
            for input in &spec.inputs {
                let Some(from) = producer.get(input) else {
                    return Err(invalid(format!(
                        "'{}' consumes {:?} but no stage produces it",
                        spec.stage, input
                    )));
                };
                if !stage_deps.contains(from) {
                    stage_deps.push(*from);
                }
            }
            deps.insert(spec.stage, stage_deps);
        }

        let order = topological_order(&specs, &deps)?;
        Ok(Self { specs, deps, order })
    }

    /// All stages in execution order
    pub fn order(&self) -> &[Stage] {
        &self.order
    }

    pub fn specs(&self) -> &[StageSpec] {
        &self.specs
    }

    /// Direct prerequisites of a stage
    pub fn prerequisites(&self, stage: Stage) -> &[Stage] {
        self.deps.get(&stage).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True if `stage` transitively depends on `on`
    pub fn depends_on(&self, stage: Stage, on: Stage) -> bool {
        let mut stack = self.prerequisites(stage).to_vec();
        let mut visited = BTreeSet::new();
        while let Some(s) = stack.pop() {
            if s == on {
                return true;
            }
            if visited.insert(s) {
                stack.extend_from_slice(self.prerequisites(s));
            }
        }
        false
    }

    /// Goals plus their transitive prerequisites, in execution order
    pub fn plan_for(&self, goals: &[Stage]) -> Vec<Stage> {
        let mut needed = BTreeSet::new();
        let mut stack: Vec<Stage> = goals.to_vec();
        while let Some(s) = stack.pop() {
            if needed.insert(s) {
                stack.extend_from_slice(self.prerequisites(s));
            }
        }
        self.order
            .iter()
            .copied()
            .filter(|s| needed.contains(s))
            .collect()
    }
}

fn topological_order(
    specs: &[StageSpec],
    deps: &HashMap<Stage, Vec<Stage>>,
) -> BridgeResult<Vec<Stage>> {
    let mut remaining: Vec<Stage> = specs.iter().map(|s| s.stage).collect();
    let mut order = Vec::with_capacity(remaining.len());
    while !remaining.is_empty() {
        let ready = remaining.iter().position(|stage| {
            deps.get(stage)
                .map(|d| d.iter().all(|dep| order.contains(dep)))
                .unwrap_or(true)
        });
        match ready {
            Some(idx) => order.push(remaining.remove(idx)),
            None => {
                let stuck: Vec<&str> = remaining.iter().map(Stage::as_str).collect();
                return Err(invalid(format!("cycle among stages: {}", stuck.join(", "))));
            }
        }
    }
    Ok(order)
}

fn invalid(message: String) -> BridgeError {
    BridgeError::InvalidStageGraph { message }
}
