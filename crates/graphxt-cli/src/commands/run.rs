//! Algorithm run command.

use std::sync::LazyLock;
use std::time::Duration;

use anyhow::{Context, Result};
use graphxt_adapters::plugins::algorithms::Outcome;
use graphxt_common::types::{EdgeId, VertexId};
use graphxt_common::utils::error::Error;
use graphxt_core::display::{Annotation, DisplayState, Element, Surface};
use graphxt_core::graph::Graph;
use graphxt_engine::{Config, Driver};
use regex::Regex;
use serde::Serialize;

use crate::output::{self, Format};
use crate::{OutputFormat, RunArgs};

type CliGraph = Graph<String, i64>;
type CliDriver = Driver<String, i64, ConsoleSurface>;

static EDGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^\s>:-]+)\s*([>-])\s*([^\s>:-]+)(?::(\d+))?$").expect("edge pattern is valid")
});

/// A parsed `--edge` argument.
#[derive(Debug, PartialEq, Eq)]
struct EdgeSpec {
    start: String,
    end: String,
    directed: bool,
    weight: i64,
}

/// Parses `A>B:3` (directed) or `A-B:3` (undirected).
fn parse_edge(text: &str) -> Result<EdgeSpec, Error> {
    let malformed = || {
        Error::InvalidArgument(format!(
            "malformed edge '{text}', expected A>B:3 or A-B:3"
        ))
    };

    let captures = EDGE_PATTERN.captures(text.trim()).ok_or_else(malformed)?;
    let weight = match captures.get(4) {
        Some(w) => w.as_str().parse().map_err(|_| malformed())?,
        None => 1,
    };

    Ok(EdgeSpec {
        start: captures[1].to_string(),
        end: captures[3].to_string(),
        directed: &captures[2] == ">",
        weight,
    })
}

fn build_graph(edges: &[String], vertices: &[String]) -> Result<CliGraph, Error> {
    let mut graph = Graph::new();
    for text in edges {
        let edge = parse_edge(text)?;
        graph.insert_edge(edge.start, edge.end, edge.directed, edge.weight);
    }
    for vertex in vertices {
        graph.insert_vertex(vertex.clone());
    }
    Ok(graph)
}

/// Surface that prints messages as they are emitted.
struct ConsoleSurface {
    state: DisplayState,
    echo: bool,
}

impl Surface for ConsoleSurface {
    fn apply(&mut self, annotation: Annotation) {
        if self.echo
            && let Annotation::Message(message) = &annotation
        {
            println!("{message}");
        }
        self.state.apply(annotation);
    }
}

/// Builds the graph, runs the algorithm, and returns the driver and the
/// number of ticks it took.
fn drive(args: &RunArgs, echo: bool) -> Result<(CliDriver, usize)> {
    let mut config = Config::default();
    if let Some(max) = args.max_ticks {
        config = config.with_max_ticks(max);
    }
    if let Some(ms) = args.interval_ms {
        config = config.with_tick_interval(Duration::from_millis(ms));
    }

    let graph = build_graph(&args.edges, &args.vertices)?;
    let surface = ConsoleSurface {
        state: DisplayState::new(),
        echo,
    };
    let mut driver = Driver::with_graph(config, graph, surface);
    driver.start_named(&args.algorithm, args.start.as_ref(), args.sink.as_ref())?;

    let ticks = if args.interval_ms.is_some() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .context("failed to start the timer runtime")?;
        runtime.block_on(driver.run_paced())?
    } else {
        driver.run_to_completion()?
    };

    Ok((driver, ticks))
}

fn vertex_name(graph: &CliGraph, id: VertexId) -> String {
    graph.payload(id).cloned().unwrap_or_else(|| id.to_string())
}

fn edge_name(graph: &CliGraph, id: EdgeId) -> String {
    match graph.edge(id) {
        Some(edge) => format!(
            "{} {} {}",
            vertex_name(graph, edge.start),
            if edge.directed { "->" } else { "-" },
            vertex_name(graph, edge.end)
        ),
        None => id.to_string(),
    }
}

fn edge_weight(graph: &CliGraph, id: EdgeId) -> String {
    graph
        .edge(id)
        .map_or_else(|| "-".to_string(), |edge| edge.payload.to_string())
}

/// A vertex in JSON output.
#[derive(Serialize)]
struct VertexOutput {
    id: VertexId,
    name: String,
    label: Option<String>,
}

/// A surviving edge in JSON output.
#[derive(Serialize)]
struct EdgeOutput {
    id: EdgeId,
    start: String,
    end: String,
    directed: bool,
    weight: i64,
    label: Option<String>,
}

/// Full result of a run.
#[derive(Serialize)]
struct RunOutput<'a> {
    algorithm: &'a str,
    ticks: usize,
    messages: &'a [String],
    outcome: Option<Outcome>,
    vertices: Vec<VertexOutput>,
    edges: Vec<EdgeOutput>,
}

fn run_output<'a>(driver: &'a CliDriver, algorithm: &'a str, ticks: usize) -> RunOutput<'a> {
    let graph = driver.graph();
    let state = &driver.surface().state;

    RunOutput {
        algorithm,
        ticks,
        messages: state.messages(),
        outcome: driver.outcome(),
        vertices: graph
            .vertices()
            .map(|v| VertexOutput {
                id: v.id,
                name: v.payload.clone(),
                label: state.label(Element::Vertex(v.id)).map(str::to_string),
            })
            .collect(),
        edges: graph
            .edges()
            .map(|e| EdgeOutput {
                id: e.id,
                start: vertex_name(graph, e.start),
                end: vertex_name(graph, e.end),
                directed: e.directed,
                weight: e.payload,
                label: state.label(Element::Edge(e.id)).map(str::to_string),
            })
            .collect(),
    }
}

fn print_outcome(outcome: &Outcome, graph: &CliGraph, quiet: bool) {
    match outcome {
        Outcome::Traversal { order } => {
            let rows = order
                .iter()
                .enumerate()
                .map(|(i, &v)| vec![(i + 1).to_string(), vertex_name(graph, v)])
                .collect();
            output::print_rows(&["#", "Vertex"], rows, quiet);
        }
        Outcome::ShortestPaths { source, distances } => {
            output::status(
                &format!("Distances from {}:", vertex_name(graph, *source)),
                quiet,
            );
            let rows = distances
                .iter()
                .map(|&(v, d)| {
                    vec![
                        vertex_name(graph, v),
                        d.map_or_else(|| "unreachable".to_string(), |d| d.to_string()),
                    ]
                })
                .collect();
            output::print_rows(&["Vertex", "Distance"], rows, quiet);
        }
        Outcome::SpanningTree {
            edges,
            total_weight,
            removed,
            spanning,
        } => {
            let rows = edges
                .iter()
                .map(|&e| vec![edge_name(graph, e), edge_weight(graph, e)])
                .collect();
            output::print_rows(&["Tree Edge", "Weight"], rows, quiet);
            output::print_key_value_table(
                &[
                    ("Total Weight", total_weight.to_string()),
                    ("Removed Edges", removed.len().to_string()),
                    ("Spanning", spanning.to_string()),
                ],
                quiet,
            );
        }
        Outcome::MaxFlow {
            value,
            augmentations,
        } => {
            output::print_key_value_table(
                &[
                    ("Maximum Flow", value.to_string()),
                    ("Augmenting Paths", augmentations.to_string()),
                ],
                quiet,
            );
        }
        Outcome::TopologicalOrder { order, complete } => {
            let rows = order
                .iter()
                .map(|&(v, k)| vec![k.to_string(), vertex_name(graph, v)])
                .collect();
            output::print_rows(&["Order", "Vertex"], rows, quiet);
            if !complete {
                output::status("Incomplete: the graph has a cycle.", quiet);
            }
        }
    }
}

/// Run the run command.
pub fn run(args: RunArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    let fmt: Format = format.into();
    let echo = matches!(fmt, Format::Table) && !quiet;
    let (driver, ticks) = drive(&args, echo)?;

    let data = run_output(&driver, &args.algorithm, ticks);
    output::print_output(&data, fmt, quiet, |_| {
        output::status(
            &format!("\n{} finished after {} ticks.", args.algorithm, ticks),
            quiet,
        );
        if let Some(outcome) = driver.outcome() {
            print_outcome(&outcome, driver.graph(), quiet);
        }

        let graph = driver.graph();
        let state = &driver.surface().state;
        let rows = graph
            .edges()
            .map(|e| {
                vec![
                    edge_name(graph, e.id),
                    e.payload.to_string(),
                    state.label(Element::Edge(e.id)).unwrap_or("").to_string(),
                ]
            })
            .collect();
        output::print_rows(&["Edge", "Weight", "Label"], rows, quiet);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(algorithm: &str, edges: &[&str]) -> RunArgs {
        RunArgs {
            algorithm: algorithm.to_string(),
            edges: edges.iter().map(|e| (*e).to_string()).collect(),
            vertices: Vec::new(),
            start: None,
            sink: None,
            interval_ms: None,
            max_ticks: None,
        }
    }

    #[test]
    fn test_parse_edge() {
        assert_eq!(
            parse_edge("A>B:3").unwrap(),
            EdgeSpec {
                start: "A".to_string(),
                end: "B".to_string(),
                directed: true,
                weight: 3,
            }
        );

        let undirected = parse_edge(" left - right ").unwrap();
        assert!(!undirected.directed);
        assert_eq!(undirected.start, "left");
        assert_eq!(undirected.end, "right");
        assert_eq!(undirected.weight, 1);
    }

    #[test]
    fn test_parse_edge_rejects_malformed_input() {
        for text in ["A", "A>", ">B", "A>B:", "A>B:x", "A>B:-3", "A=B", ""] {
            assert!(
                matches!(parse_edge(text), Err(Error::InvalidArgument(_))),
                "accepted {text:?}"
            );
        }
        assert!(parse_edge("A>B:99999999999999999999").is_err());
    }

    #[test]
    fn test_build_graph_adds_isolated_vertices() {
        let graph = build_graph(
            &["A>B:2".to_string(), "B-C".to_string()],
            &["Z".to_string(), "A".to_string()],
        )
        .unwrap();

        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.contains(&"Z".to_string()));
    }

    #[test]
    fn test_drive_dijkstra() {
        let mut args = args(
            "dijkstra",
            &["A>B:1", "A>C:4", "B>C:2", "B>D:5", "C>D:1"],
        );
        args.start = Some("A".to_string());
        let (driver, ticks) = drive(&args, false).unwrap();

        assert_eq!(ticks, 5);
        let json = serde_json::to_value(run_output(&driver, "dijkstra", ticks)).unwrap();
        assert_eq!(json["outcome"]["kind"], "shortest_paths");
        assert_eq!(json["vertices"][3]["name"], "D");
        assert_eq!(json["vertices"][3]["label"], "C/4");
        assert_eq!(json["edges"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_drive_kruskal_reports_surviving_edges() {
        let args = args("kruskal", &["A-B:1", "B-C:2", "C-D:3", "D-A:4"]);
        let (driver, ticks) = drive(&args, false).unwrap();

        let output = run_output(&driver, "kruskal", ticks);
        let weights: Vec<_> = output.edges.iter().map(|e| e.weight).collect();
        assert_eq!(weights, vec![1, 2, 3]);
    }

    #[test]
    fn test_drive_errors() {
        let mut flow = args("ford-fulkerson", &["s>t:3"]);
        let err = drive(&flow, false).err().unwrap();
        assert!(err.to_string().contains("requires a sink vertex"));

        flow.sink = Some("x".to_string());
        let err = drive(&flow, false).err().unwrap();
        assert_eq!(err.to_string(), "vertex not found: x");

        let mut bfs = args("bfs", &["A>B", "B>C"]);
        bfs.max_ticks = Some(1);
        let err = drive(&bfs, false).err().unwrap();
        assert!(err.to_string().contains("tick limit of 1"));

        let err = drive(&args("bfs", &["A~B"]), false).err().unwrap();
        assert!(err.to_string().starts_with("invalid argument"));
    }

    #[test]
    fn test_drive_paced() {
        let mut args = args("ford-fulkerson-bfs", &["s>a:2", "a>t:1", "s>t:1"]);
        args.start = Some("s".to_string());
        args.sink = Some("t".to_string());
        args.interval_ms = Some(1);
        let (driver, _) = drive(&args, false).unwrap();

        assert_eq!(
            driver.outcome(),
            Some(Outcome::MaxFlow {
                value: 2,
                augmentations: 2,
            })
        );
    }
}
