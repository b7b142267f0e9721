use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;

use anyhow::{Context, Result};
use graphviz_rust::cmd::{CommandArg, Format};
use oxrdf::Graph;
use oxttl::TurtleSerializer;
use tracing::info;

/// Cap on triples in the rendered image. The Turtle file always carries the
/// full graph; only the picture is truncated for readability.
pub const MAX_TRIPLES: usize = 15;

const TTL_PATH: &str = "data/output/document.ttl";
const PNG_PATH: &str = "data/output/document_kg.png";

/// Render the first [`MAX_TRIPLES`] triples as a PNG and serialize the full
/// graph as Turtle.
pub fn visualize(graph: &Graph) -> Result<()> {
    info!(
        "Visualizing RDF graph ({} triples, rendering at most {})",
        graph.len(),
        MAX_TRIPLES
    );

    let subset = truncate(graph, MAX_TRIPLES);
    render_png(&to_dot(&subset), PNG_PATH)?;

    let file = File::create(TTL_PATH).with_context(|| format!("Failed to create {}", TTL_PATH))?;
    write_turtle(graph, file)?;

    info!("Visualization saved to {}, graph serialized to {}", PNG_PATH, TTL_PATH);
    Ok(())
}

/// A new graph holding the first `max` triples in iteration order.
pub fn truncate(graph: &Graph, max: usize) -> Graph {
    let mut subset = Graph::default();
    for triple in graph.iter().take(max) {
        subset.insert(triple);
    }
    subset
}

/// DOT rendering of a graph: one node per distinct subject/object term,
/// one labelled edge per triple.
pub fn to_dot(graph: &Graph) -> String {
    let mut ids: HashMap<String, usize> = HashMap::new();
    let mut nodes = String::new();
    let mut edges = String::new();

    for triple in graph.iter() {
        let s = node_id(&mut ids, &mut nodes, &triple.subject.to_string());
        let o = node_id(&mut ids, &mut nodes, &triple.object.to_string());
        let _ = writeln!(
            edges,
            "  n{} -> n{} [label=\"{}\"];",
            s,
            o,
            escape(&triple.predicate.to_string())
        );
    }

    format!("digraph rdf {{\n  node [shape=box, fontsize=10];\n{}{}}}\n", nodes, edges)
}

/// Serialize the full graph as Turtle into `writer`.
pub fn write_turtle<W: Write>(graph: &Graph, writer: W) -> Result<W> {
    let mut serializer = TurtleSerializer::new().for_writer(writer);
    for triple in graph.iter() {
        serializer
            .serialize_triple(triple)
            .context("Failed to serialize triple")?;
    }
    serializer.finish().context("Failed to finish Turtle output")
}

fn render_png(dot: &str, path: &str) -> Result<()> {
    graphviz_rust::exec_dot(
        dot.to_string(),
        vec![Format::Png.into(), CommandArg::Output(path.to_string())],
    )
    .with_context(|| format!("Failed to render {}", path))?;
    Ok(())
}

fn node_id(ids: &mut HashMap<String, usize>, nodes: &mut String, term: &str) -> usize {
    if let Some(&id) = ids.get(term) {
        return id;
    }
    let id = ids.len();
    ids.insert(term.to_string(), id);
    let _ = writeln!(nodes, "  n{} [label=\"{}\"];", id, escape(term));
    id
}

fn escape(term: &str) -> String {
    term.replace('\\', "\\\\").replace('"', "\\\"")
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::{Literal, NamedNode, Triple};

    fn graph_of(n: usize) -> Graph {
        let mut graph = Graph::default();
        let predicate = NamedNode::new("http://example.org/p").unwrap();
        for i in 0..n {
            graph.insert(&Triple::new(
                NamedNode::new(format!("http://example.org/s{}", i)).unwrap(),
                predicate.clone(),
                Literal::new_simple_literal(format!("object {}", i)),
            ));
        }
        graph
    }

    #[test]
    fn truncation_caps_at_max_triples() {
        let graph = graph_of(100);
        assert_eq!(truncate(&graph, MAX_TRIPLES).len(), 15);
    }

    #[test]
    fn truncation_of_small_graph_keeps_everything() {
        let graph = graph_of(3);
        assert_eq!(truncate(&graph, MAX_TRIPLES).len(), 3);
    }

    #[test]
    fn serialized_file_carries_the_full_graph() {
        // 100 triples in, image subset capped at 15, Turtle output holds all 100.
        let graph = graph_of(100);
        assert_eq!(truncate(&graph, MAX_TRIPLES).len(), 15);

        let bytes = write_turtle(&graph, Vec::new()).unwrap();
        let turtle = String::from_utf8(bytes).unwrap();
        for i in 0..100 {
            assert!(
                turtle.contains(&format!("<http://example.org/s{}>", i)),
                "missing subject s{}",
                i
            );
        }
    }

    #[test]
    fn dot_output_has_one_edge_per_triple() {
        let graph = graph_of(5);
        let dot = to_dot(&graph);
        assert!(dot.starts_with("digraph rdf {"));
        assert_eq!(dot.matches(" -> ").count(), 5);
    }

    #[test]
    fn dot_labels_are_escaped() {
        let mut graph = Graph::default();
        graph.insert(&Triple::new(
            NamedNode::new("http://example.org/s").unwrap(),
            NamedNode::new("http://example.org/p").unwrap(),
            Literal::new_simple_literal("say \"hi\""),
        ));
        // N-Triples already renders the literal as "say \"hi\""; DOT escaping
        // doubles the backslashes and escapes the quotes.
        let dot = to_dot(&graph);
        assert!(dot.contains(r#"\\\"hi\\\""#));
    }
}
