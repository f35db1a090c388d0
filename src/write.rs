use crate::{
    data::money,
    graph::{Colors, FlowGraph, Rgb},
    report::Report,
};
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

/// Prints the report, one line each.
pub(crate) fn write_report<W: std::io::Write>(
    mut writer: W,
    report: &Report,
) -> Result<(), anyhow::Error> {
    for line in &report.lines {
        writeln!(writer, "{line}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Proxy for serializing a `FlowGraph` as a Sankey trace, the format plotting
/// front-ends take as is.
#[derive(Serialize)]
struct SankeyTrace {
    #[serde(rename = "type")]
    kind: &'static str,
    node: SankeyNodes,
    link: SankeyLinks,
}

#[derive(Serialize)]
struct SankeyNodes {
    label: Vec<String>,
    color: Vec<String>,
}

#[derive(Serialize)]
struct SankeyLinks {
    source: Vec<usize>,
    target: Vec<usize>,
    value: Vec<f64>,
    color: Vec<String>,
}

impl Rgb {
    fn opaque(self) -> String {
        format!("rgba({}, {}, {}, 1)", self.0, self.1, self.2)
    }

    fn light(self) -> String {
        format!("rgba({}, {}, {}, 0.5)", self.0, self.1, self.2)
    }
}

impl SankeyTrace {
    fn new(graph: &FlowGraph, colors: &Colors) -> Result<Self, anyhow::Error> {
        let value: Vec<f64> = graph
            .links
            .value
            .iter()
            .map(|value| {
                value
                    .to_f64()
                    .ok_or_else(|| anyhow::anyhow!("flow of {value} does not fit a float"))
            })
            .collect::<Result<_, anyhow::Error>>()?;
        Ok(Self {
            kind: "sankey",
            node: SankeyNodes {
                label: graph
                    .nodes
                    .iter()
                    .map(|node| format!("{} {}", node.label, money(node.amount)))
                    .collect(),
                color: colors.nodes.iter().map(|c| c.opaque()).collect(),
            },
            link: SankeyLinks {
                source: graph.links.source.clone(),
                target: graph.links.target.clone(),
                value,
                color: colors.links.iter().map(|c| c.light()).collect(),
            },
        })
    }
}

/// Exports the flow graph as JSON for a diagram renderer.
pub(crate) fn write_sankey<W: std::io::Write>(
    writer: W,
    graph: &FlowGraph,
    colors: &Colors,
) -> Result<(), anyhow::Error> {
    serde_json::to_writer_pretty(writer, &SankeyTrace::new(graph, colors)?)?;
    Ok(())
}
