//! Command plan types and pipeline rendering.

use camstream_model::{Invocation, ProcessChain};
use serde::Serialize;

/// GStreamer command-line launcher.
pub const GST_LAUNCH: &str = "gst-launch-1.0";

/// V4L2 control utility.
pub const V4L2_CTL: &str = "v4l2-ctl";

/// Role of a stage in the plan.
///
/// `DeviceControl` never appears in [`CommandPlan::stages`]: device controls
/// are side effects kept in [`CommandPlan::setup`], and only
/// [`CommandPlan::stage_kinds`] reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StageKind {
    Source,
    DeviceControl,
    Encode,
    TransportSink,
}

/// A GStreamer element (or caps filter) with its properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    pub factory: String,
    pub properties: Vec<(String, String)>,
}

impl Element {
    pub fn new(factory: impl Into<String>) -> Self {
        Self {
            factory: factory.into(),
            properties: Vec::new(),
        }
    }

    pub fn property(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.properties.push((name.into(), value.to_string()));
        self
    }

    /// Value of a property, if set.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn tokens(&self) -> impl Iterator<Item = String> + '_ {
        std::iter::once(self.factory.clone()).chain(
            self.properties
                .iter()
                .map(|(name, value)| format!("{name}={value}")),
        )
    }
}

/// What a stage runs: its own process, or elements in the GStreamer graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StageBody {
    /// A standalone program writing the stream to stdout.
    Process(Invocation),
    /// Elements linked into the `gst-launch-1.0` graph.
    Elements(Vec<Element>),
}

/// One step of the data-flow pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineStage {
    pub kind: StageKind,
    pub body: StageBody,
}

impl PipelineStage {
    pub fn process(kind: StageKind, invocation: Invocation) -> Self {
        Self {
            kind,
            body: StageBody::Process(invocation),
        }
    }

    pub fn elements(kind: StageKind, elements: Vec<Element>) -> Self {
        Self {
            kind,
            body: StageBody::Elements(elements),
        }
    }

    /// Element factory names in link order (empty for process stages).
    pub fn factories(&self) -> Vec<&str> {
        match &self.body {
            StageBody::Process(_) => Vec::new(),
            StageBody::Elements(elements) => elements.iter().map(|e| e.factory.as_str()).collect(),
        }
    }

    /// First element with the given factory name.
    pub fn element(&self, factory: &str) -> Option<&Element> {
        match &self.body {
            StageBody::Process(_) => None,
            StageBody::Elements(elements) => elements.iter().find(|e| e.factory == factory),
        }
    }
}

/// A device control to set before capture starts.
///
/// Devices expose different subsets of controls, so each one is attempted
/// independently and a failure is not fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceControl {
    pub device: String,
    pub control: String,
    pub value: String,
}

impl DeviceControl {
    pub fn new(device: &str, control: &str, value: impl ToString) -> Self {
        Self {
            device: device.to_string(),
            control: control.to_string(),
            value: value.to_string(),
        }
    }

    pub fn invocation(&self) -> Invocation {
        Invocation::new(V4L2_CTL)
            .arg("-d")
            .arg(self.device.clone())
            .arg(format!("--set-ctrl={}={}", self.control, self.value))
    }
}

/// Everything needed to start a capture stream.
///
/// Setup controls run first, strictly in order, and must finish before the
/// pipeline starts. The pipeline is a single process chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandPlan {
    setup: Vec<DeviceControl>,
    stages: Vec<PipelineStage>,
    pipeline: ProcessChain,
}

impl CommandPlan {
    pub(crate) fn new(
        setup: Vec<DeviceControl>,
        stages: Vec<PipelineStage>,
        pipeline: ProcessChain,
    ) -> Self {
        Self {
            setup,
            stages,
            pipeline,
        }
    }

    pub fn setup(&self) -> &[DeviceControl] {
        &self.setup
    }

    pub fn setup_invocations(&self) -> Vec<Invocation> {
        self.setup.iter().map(DeviceControl::invocation).collect()
    }

    pub fn stages(&self) -> &[PipelineStage] {
        &self.stages
    }

    /// Kinds in execution order: one `DeviceControl` per setup step, then
    /// the kinds of the pipeline stages.
    pub fn stage_kinds(&self) -> Vec<StageKind> {
        self.setup
            .iter()
            .map(|_| StageKind::DeviceControl)
            .chain(self.stages.iter().map(|s| s.kind))
            .collect()
    }

    pub fn pipeline(&self) -> &ProcessChain {
        &self.pipeline
    }
}

/// `gst-launch-1.0` argument vector under construction.
struct LaunchGraph {
    args: Vec<String>,
    linked: usize,
}

impl LaunchGraph {
    fn new() -> Self {
        Self {
            args: vec!["--no-fault".to_string()],
            linked: 0,
        }
    }

    fn link(&mut self, element: &Element) {
        if self.linked > 0 {
            self.args.push("!".to_string());
        }
        self.args.extend(element.tokens());
        self.linked += 1;
    }

    fn finish(self) -> Invocation {
        Invocation::new(GST_LAUNCH).args(self.args)
    }
}

/// Render stages into the process chain that runs them.
///
/// Process stages become their own processes. Consecutive element stages
/// share one `gst-launch-1.0` graph; a graph following a process reads it
/// from stdin through `fdsrc fd=0`. Returns `None` for an empty stage list.
pub fn render(stages: &[PipelineStage]) -> Option<ProcessChain> {
    let mut processes: Vec<Invocation> = Vec::new();
    let mut graph: Option<LaunchGraph> = None;

    for stage in stages {
        match &stage.body {
            StageBody::Process(invocation) => {
                if let Some(done) = graph.take() {
                    processes.push(done.finish());
                }
                processes.push(invocation.clone());
            }
            StageBody::Elements(elements) => {
                let current = graph.get_or_insert_with(|| {
                    let mut fresh = LaunchGraph::new();
                    if !processes.is_empty() {
                        fresh.link(&Element::new("fdsrc").property("fd", 0));
                    }
                    fresh
                });
                for element in elements {
                    current.link(element);
                }
            }
        }
    }

    if let Some(done) = graph.take() {
        processes.push(done.finish());
    }

    let mut processes = processes.into_iter();
    let first = processes.next()?;
    Some(processes.fold(ProcessChain::new(first), ProcessChain::pipe))
}
