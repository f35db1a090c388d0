use crate::{
    compute::Totals,
    data::Error,
    report::{HUB, SAVINGS},
};
use log::debug;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Node {
    pub label: String,
    pub amount: Decimal,
}

/// Edges are kept as three parallel lists, the shape Sankey renderers consume.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Links {
    pub source: Vec<usize>,
    pub target: Vec<usize>,
    pub value: Vec<Decimal>,
}

/// Money flow as a graph: revenue categories, the hub, expense categories and
/// finally savings if there are any. Every revenue flows into the hub and every
/// expense flows out of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FlowGraph {
    pub nodes: Vec<Node>,
    pub links: Links,
    pub hub: usize,
}

impl FlowGraph {
    pub fn new(totals: &Totals, savings: Decimal) -> Result<Self, Error> {
        let node = |label: &str, amount: Decimal| Node {
            label: label.to_string(),
            amount,
        };
        let mut nodes: Vec<Node> = totals
            .revenues
            .iter()
            .map(|(category, amount)| node(category, *amount))
            .collect();
        let hub = nodes.len();
        nodes.push(node(HUB, totals.revenues.values().sum()));
        nodes.extend(
            totals
                .expenses
                .iter()
                .map(|(category, amount)| node(category, *amount)),
        );
        let mut graph = Self {
            nodes,
            links: Links::default(),
            hub,
        };
        for (index, amount) in totals.revenues.values().enumerate() {
            graph.link(index, hub, *amount);
        }
        for (offset, amount) in totals.expenses.values().enumerate() {
            graph.link(hub, hub + 1 + offset, *amount);
        }
        if savings > Decimal::ZERO {
            graph.nodes.push(node(SAVINGS, savings));
            graph.link(hub, graph.nodes.len() - 1, savings);
        }
        graph.check()?;
        debug!(
            "flow graph has {} nodes and {} links",
            graph.nodes.len(),
            graph.links.value.len()
        );
        Ok(graph)
    }

    fn link(&mut self, source: usize, target: usize, value: Decimal) {
        self.links.source.push(source);
        self.links.target.push(target);
        self.links.value.push(value);
    }

    /// The three link lists must line up and point at existing nodes.
    pub fn check(&self) -> Result<(), Error> {
        let Links {
            source,
            target,
            value,
        } = &self.links;
        let in_range = |index: &usize| *index < self.nodes.len();
        if source.len() != target.len()
            || source.len() != value.len()
            || !source.iter().all(in_range)
            || !target.iter().all(in_range)
        {
            return Err(Error::GraphConsistency {
                sources: source.len(),
                targets: target.len(),
                values: value.len(),
                nodes: self.nodes.len(),
            });
        }
        Ok(())
    }

    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, Decimal)> + '_ {
        self.links
            .source
            .iter()
            .zip(&self.links.target)
            .zip(&self.links.value)
            .map(|((source, target), value)| (*source, *target, *value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Rgb(pub u8, pub u8, pub u8);

/// Where node colors come from. Colors are pure decoration, so the graph itself
/// never depends on them.
pub(crate) trait ColorSource {
    fn next_color(&mut self) -> Rgb;
}

const PALETTE: [Rgb; 10] = [
    Rgb(31, 119, 180),
    Rgb(255, 127, 14),
    Rgb(44, 160, 44),
    Rgb(214, 39, 40),
    Rgb(148, 103, 189),
    Rgb(140, 86, 75),
    Rgb(227, 119, 194),
    Rgb(127, 127, 127),
    Rgb(188, 189, 34),
    Rgb(23, 190, 207),
];

/// Cycles through a fixed set of colors.
#[derive(Debug, Default)]
pub(crate) struct Palette {
    next: usize,
}

impl ColorSource for Palette {
    fn next_color(&mut self) -> Rgb {
        let color = PALETTE[self.next % PALETTE.len()];
        self.next += 1;
        color
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Colors {
    pub nodes: Vec<Rgb>,
    pub links: Vec<Rgb>,
}

/// One color per node; a link takes the color of its category end, the hub
/// side doesn't count.
pub(crate) fn colorize<C: ColorSource>(graph: &FlowGraph, colors: &mut C) -> Colors {
    let nodes: Vec<Rgb> = graph.nodes.iter().map(|_| colors.next_color()).collect();
    let links = graph
        .edges()
        .map(|(source, target, _)| {
            if source == graph.hub {
                nodes[target]
            } else {
                nodes[source]
            }
        })
        .collect();
    Colors { nodes, links }
}
