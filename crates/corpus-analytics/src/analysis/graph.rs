//! Citation and co-authorship relationship graphs with centrality metrics.
//!
//! Graphs are plain in-memory adjacency structures keyed by a stable node
//! identity: paper title for the citation graph, author name for the
//! co-authorship graph. Node indices follow first-seen order in the input
//! collection, which is also the tie-break order for rankings.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use tracing::warn;

use crate::config::defaults;
use crate::error::AnalysisError;
use crate::models::{CentralityReport, PaperRecord, RankedEntity};

/// A directed or undirected relationship graph.
///
/// Directed edges are deduplicated per (source, target) pair; undirected
/// edges carry an integer weight that grows by 1 per discovered shared
/// paper. Self-loops are never stored.
#[derive(Debug, Clone)]
pub struct RelationshipGraph {
    directed: bool,
    nodes: Vec<String>,
    index: HashMap<String, usize>,
    /// Adjacency. Directed: successors only. Undirected: symmetric.
    adjacency: Vec<Vec<usize>>,
    /// Directed only: predecessors.
    predecessors: Vec<Vec<usize>>,
    /// Directed edge set, for deduplication.
    edges: HashSet<(usize, usize)>,
    /// Undirected edge weights keyed by (min, max) node index.
    weights: HashMap<(usize, usize), u32>,
}

impl RelationshipGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            nodes: Vec::new(),
            index: HashMap::new(),
            adjacency: Vec::new(),
            predecessors: Vec::new(),
            edges: HashSet::new(),
            weights: HashMap::new(),
        }
    }

    /// Whether edges are directed.
    #[must_use]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Node identities in first-seen order.
    #[must_use]
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges (directed pairs or undirected weighted edges).
    #[must_use]
    pub fn edge_count(&self) -> usize {
        if self.directed { self.edges.len() } else { self.weights.len() }
    }

    /// Index of a node, if present.
    #[must_use]
    pub fn node_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Weight of the undirected edge between two named nodes, if any.
    #[must_use]
    pub fn edge_weight(&self, a: &str, b: &str) -> Option<u32> {
        let a = self.node_index(a)?;
        let b = self.node_index(b)?;
        self.weights.get(&ordered(a, b)).copied()
    }

    /// Successors of a node (directed) or neighbors (undirected).
    #[must_use]
    pub fn successors(&self, node: usize) -> &[usize] {
        self.adjacency.get(node).map_or(&[], Vec::as_slice)
    }

    /// Predecessors of a node (directed graphs only).
    #[must_use]
    pub fn predecessors(&self, node: usize) -> &[usize] {
        self.predecessors.get(node).map_or(&[], Vec::as_slice)
    }

    /// Intern a node, returning its index. First insertion fixes the node's
    /// position in ranking tie-breaks.
    pub fn add_node(&mut self, name: &str) -> usize {
        if let Some(&existing) = self.index.get(name) {
            return existing;
        }
        let node = self.nodes.len();
        self.nodes.push(name.to_string());
        self.index.insert(name.to_string(), node);
        self.adjacency.push(Vec::new());
        self.predecessors.push(Vec::new());
        node
    }

    /// Add a directed edge, deduplicated per (source, target) pair.
    /// Self-loops are dropped.
    pub fn add_edge(&mut self, source: &str, target: &str) {
        let source = self.add_node(source);
        let target = self.add_node(target);
        if source == target {
            return;
        }
        if self.edges.insert((source, target)) {
            self.adjacency[source].push(target);
            self.predecessors[target].push(source);
        }
    }

    /// Increment the weight of an undirected edge, creating it at weight 1.
    /// Self-loops are dropped.
    pub fn add_shared_edge(&mut self, a: &str, b: &str) {
        let a = self.add_node(a);
        let b = self.add_node(b);
        if a == b {
            return;
        }
        let entry = self.weights.entry(ordered(a, b)).or_insert(0);
        if *entry == 0 {
            self.adjacency[a].push(b);
            self.adjacency[b].push(a);
        }
        *entry += 1;
    }

    /// Fraction of possible connections realized: `m / (n(n-1))` directed,
    /// `2m / (n(n-1))` undirected. Zero for graphs with <= 1 node.
    #[must_use]
    pub fn density(&self) -> f64 {
        let n = self.node_count();
        if n <= 1 {
            return 0.0;
        }
        let possible = (n * (n - 1)) as f64;
        let m = self.edge_count() as f64;
        if self.directed { m / possible } else { 2.0 * m / possible }
    }

    /// Neighbor set ignoring edge direction.
    fn undirected_neighbors(&self, node: usize) -> Vec<usize> {
        if !self.directed {
            return self.adjacency[node].clone();
        }
        let mut seen: HashSet<usize> = self.adjacency[node].iter().copied().collect();
        seen.extend(self.predecessors[node].iter().copied());
        let mut neighbors: Vec<usize> = seen.into_iter().collect();
        neighbors.sort_unstable();
        neighbors
    }

    /// Whether two nodes are connected by an edge in either direction.
    fn connected(&self, a: usize, b: usize) -> bool {
        if self.directed {
            self.edges.contains(&(a, b)) || self.edges.contains(&(b, a))
        } else {
            self.weights.contains_key(&ordered(a, b))
        }
    }

    /// Local clustering coefficient of every node, direction-agnostic.
    #[must_use]
    pub fn local_clustering(&self) -> Vec<f64> {
        (0..self.node_count())
            .map(|node| {
                let neighbors = self.undirected_neighbors(node);
                let k = neighbors.len();
                if k < 2 {
                    return 0.0;
                }
                let mut links = 0usize;
                for (i, &a) in neighbors.iter().enumerate() {
                    for &b in &neighbors[i + 1..] {
                        if self.connected(a, b) {
                            links += 1;
                        }
                    }
                }
                2.0 * links as f64 / (k * (k - 1)) as f64
            })
            .collect()
    }

    /// Mean of the local clustering coefficients; zero for an empty graph.
    #[must_use]
    pub fn average_clustering(&self) -> f64 {
        let n = self.node_count();
        if n == 0 {
            return 0.0;
        }
        self.local_clustering().iter().sum::<f64>() / n as f64
    }
}

fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Ranking metric for [`GraphAnalyzer::rank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankMetric {
    /// Iterative rank-propagation influence (citation graph).
    Influence,
    /// Eigenvector centrality (co-authorship graph).
    Eigenvector,
}

/// Builds relationship graphs from paper records and ranks their nodes.
#[derive(Debug, Clone)]
pub struct GraphAnalyzer {
    top_ranked: usize,
    damping: f64,
    max_iterations: usize,
    epsilon: f64,
}

impl GraphAnalyzer {
    /// Create an analyzer reporting the top `top_ranked` entities per graph.
    #[must_use]
    pub fn new(top_ranked: usize) -> Self {
        Self {
            top_ranked,
            damping: defaults::DAMPING,
            max_iterations: defaults::MAX_ITERATIONS,
            epsilon: defaults::EPSILON,
        }
    }

    /// Build the directed citation graph: one node per paper title seen as
    /// citer or citee, one edge per distinct (citer, citee) pair. Citees
    /// outside the corpus stay as dangling nodes; linking is by literal
    /// reference title.
    #[must_use]
    pub fn build_citation_graph(&self, papers: &[PaperRecord]) -> RelationshipGraph {
        let mut graph = RelationshipGraph::new(true);
        for paper in papers {
            if !paper.has_title() {
                let skip = AnalysisError::malformed(&paper.source_id, "title");
                warn!(error = %skip, "record skipped for citation graph");
                continue;
            }
            graph.add_node(&paper.title);
            for reference in &paper.references {
                if let Some(cited) = reference.title.as_deref() {
                    if !cited.trim().is_empty() {
                        graph.add_edge(&paper.title, cited);
                    }
                }
            }
        }
        graph
    }

    /// Build the undirected co-authorship graph: every unordered pair of
    /// distinct authors on a paper shares an edge whose weight counts their
    /// shared papers.
    #[must_use]
    pub fn build_coauthor_graph(&self, papers: &[PaperRecord]) -> RelationshipGraph {
        let mut graph = RelationshipGraph::new(false);
        for paper in papers {
            let authors: Vec<&str> =
                paper.authors.iter().map(String::as_str).filter(|a| !a.trim().is_empty()).collect();
            if authors.is_empty() {
                let skip = AnalysisError::malformed(&paper.source_id, "authors");
                warn!(error = %skip, "record skipped for co-authorship graph");
                continue;
            }
            for (i, a) in authors.iter().enumerate() {
                for b in &authors[i + 1..] {
                    graph.add_shared_edge(a, b);
                }
            }
        }
        graph
    }

    /// Compute the graph's centrality report, ranked by `metric`.
    ///
    /// An empty graph yields empty mappings and zero statistics rather than
    /// an error.
    #[must_use]
    pub fn rank(&self, graph: &RelationshipGraph, metric: RankMetric) -> CentralityReport {
        let degree = degree_centrality(graph);
        let clustering = graph.local_clustering();

        let mut report = CentralityReport {
            degree: to_map(graph, &degree),
            clustering: to_map(graph, &clustering),
            density: graph.density(),
            average_clustering: graph.average_clustering(),
            ..Default::default()
        };

        let ranking_scores = match metric {
            RankMetric::Influence => {
                let betweenness = betweenness_centrality(graph);
                let influence = self.rank_propagation(graph);
                report.betweenness = to_map(graph, &betweenness);
                report.influence = to_map(graph, &influence);
                influence
            }
            RankMetric::Eigenvector => {
                let eigenvector = self.eigenvector_centrality(graph);
                report.eigenvector = to_map(graph, &eigenvector);
                eigenvector
            }
        };

        report.top_ranked = top_ranked(graph, &ranking_scores, self.top_ranked);
        report
    }

    /// Iterative rank-propagation over the directed graph: the random-surfer
    /// model with uniform teleport. Dangling mass is redistributed uniformly
    /// so scores stay a distribution even when most citees have no outgoing
    /// edges.
    fn rank_propagation(&self, graph: &RelationshipGraph) -> Vec<f64> {
        let n = graph.node_count();
        if n == 0 {
            return Vec::new();
        }

        let n_f64 = n as f64;
        let teleport = (1.0 - self.damping) / n_f64;
        let out_counts: Vec<usize> = (0..n).map(|node| graph.successors(node).len()).collect();
        let mut scores = vec![1.0 / n_f64; n];

        for _ in 0..self.max_iterations {
            let dangling: f64 = scores
                .iter()
                .zip(&out_counts)
                .filter(|(_, out)| **out == 0)
                .map(|(score, _)| *score)
                .sum();

            let mut next = vec![0.0; n];
            let mut max_diff: f64 = 0.0;
            for node in 0..n {
                let incoming: f64 = graph
                    .predecessors(node)
                    .iter()
                    .map(|&citing| scores[citing] / out_counts[citing] as f64)
                    .sum();
                let score = teleport + self.damping * (incoming + dangling / n_f64);
                max_diff = max_diff.max((score - scores[node]).abs());
                next[node] = score;
            }

            scores = next;
            if max_diff < self.epsilon {
                break;
            }
        }

        scores
    }

    /// Weighted eigenvector centrality by power iteration, L2-normalized.
    /// A graph with no edges reports all zeros.
    fn eigenvector_centrality(&self, graph: &RelationshipGraph) -> Vec<f64> {
        let n = graph.node_count();
        if n == 0 {
            return Vec::new();
        }
        if graph.edge_count() == 0 {
            return vec![0.0; n];
        }

        let mut scores = vec![1.0 / (n as f64).sqrt(); n];

        for _ in 0..self.max_iterations {
            let mut next = vec![0.0; n];
            for node in 0..n {
                for &neighbor in graph.successors(node) {
                    let weight = graph
                        .weights
                        .get(&ordered(node, neighbor))
                        .copied()
                        .unwrap_or(1);
                    next[neighbor] += f64::from(weight) * scores[node];
                }
            }

            let norm: f64 = next.iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm == 0.0 {
                return vec![0.0; n];
            }
            for value in &mut next {
                *value /= norm;
            }

            let drift: f64 = next.iter().zip(&scores).map(|(a, b)| (a - b).abs()).sum();
            scores = next;
            if drift < n as f64 * self.epsilon {
                break;
            }
        }

        scores
    }
}

impl Default for GraphAnalyzer {
    fn default() -> Self {
        Self::new(defaults::TOP_RANKED)
    }
}

/// Degree centrality: realized fraction of possible connections,
/// `deg / (n-1)` with in+out degree on directed graphs.
#[must_use]
pub fn degree_centrality(graph: &RelationshipGraph) -> Vec<f64> {
    let n = graph.node_count();
    if n <= 1 {
        return vec![0.0; n];
    }
    let scale = 1.0 / (n - 1) as f64;
    (0..n)
        .map(|node| {
            let degree = if graph.is_directed() {
                graph.successors(node).len() + graph.predecessors(node).len()
            } else {
                graph.successors(node).len()
            };
            degree as f64 * scale
        })
        .collect()
}

/// Betweenness centrality via Brandes' algorithm over unweighted shortest
/// paths, normalized by `1/((n-1)(n-2))` on directed graphs.
#[must_use]
pub fn betweenness_centrality(graph: &RelationshipGraph) -> Vec<f64> {
    let n = graph.node_count();
    let mut centrality = vec![0.0; n];
    if n < 3 {
        return centrality;
    }

    for source in 0..n {
        let mut stack = Vec::new();
        let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut sigma = vec![0.0f64; n];
        let mut dist = vec![-1i64; n];
        sigma[source] = 1.0;
        dist[source] = 0;

        let mut queue = VecDeque::new();
        queue.push_back(source);
        while let Some(node) = queue.pop_front() {
            stack.push(node);
            for &next in graph.successors(node) {
                if dist[next] < 0 {
                    dist[next] = dist[node] + 1;
                    queue.push_back(next);
                }
                if dist[next] == dist[node] + 1 {
                    sigma[next] += sigma[node];
                    preds[next].push(node);
                }
            }
        }

        let mut delta = vec![0.0f64; n];
        while let Some(node) = stack.pop() {
            for &pred in &preds[node] {
                delta[pred] += sigma[pred] / sigma[node] * (1.0 + delta[node]);
            }
            if node != source {
                centrality[node] += delta[node];
            }
        }
    }

    let scale = if graph.is_directed() {
        1.0 / ((n - 1) * (n - 2)) as f64
    } else {
        // Undirected traversals count each pair twice.
        1.0 / ((n - 1) * (n - 2)) as f64 / 2.0
    };
    for value in &mut centrality {
        *value *= scale;
    }
    centrality
}

fn to_map(graph: &RelationshipGraph, scores: &[f64]) -> BTreeMap<String, f64> {
    graph.nodes().iter().cloned().zip(scores.iter().copied()).collect()
}

/// Top-N nodes by score, descending; ties broken by first-seen node order.
fn top_ranked(graph: &RelationshipGraph, scores: &[f64], limit: usize) -> Vec<RankedEntity> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| {
        scores[b].partial_cmp(&scores[a]).unwrap_or(std::cmp::Ordering::Equal).then(a.cmp(&b))
    });
    order
        .into_iter()
        .take(limit)
        .map(|node| RankedEntity { name: graph.nodes()[node].clone(), score: scores[node] })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_construction() {
        let mut graph = RelationshipGraph::new(true);
        // A cites B, B cites C
        graph.add_edge("a", "b");
        graph.add_edge("b", "c");

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.successors(0), &[1]);
        assert_eq!(graph.predecessors(1), &[0]);
    }

    #[test]
    fn test_duplicate_directed_edges_collapse() {
        let mut graph = RelationshipGraph::new(true);
        graph.add_edge("a", "b");
        graph.add_edge("a", "b");
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.successors(0), &[1]);
    }

    #[test]
    fn test_self_loops_are_dropped() {
        let mut graph = RelationshipGraph::new(true);
        graph.add_edge("a", "a");
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);

        let mut undirected = RelationshipGraph::new(false);
        undirected.add_shared_edge("x", "x");
        assert_eq!(undirected.edge_count(), 0);
    }

    #[test]
    fn test_shared_edge_weights_increment() {
        let mut graph = RelationshipGraph::new(false);
        graph.add_shared_edge("a", "b");
        graph.add_shared_edge("a", "b");
        graph.add_shared_edge("b", "a");
        assert_eq!(graph.edge_weight("a", "b"), Some(3));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_density_bounds() {
        let mut graph = RelationshipGraph::new(true);
        assert!((graph.density() - 0.0).abs() < f64::EPSILON);
        graph.add_node("only");
        assert!((graph.density() - 0.0).abs() < f64::EPSILON);
        graph.add_edge("only", "other");
        // 1 edge out of 2 possible.
        assert!((graph.density() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_rank_propagation_prefers_cited_nodes() {
        // A -> B <- D, B -> C: B gathers citations, so B outranks A.
        let mut graph = RelationshipGraph::new(true);
        graph.add_edge("a", "b");
        graph.add_edge("b", "c");
        graph.add_edge("d", "b");

        let analyzer = GraphAnalyzer::default();
        let scores = analyzer.rank_propagation(&graph);
        let b = graph.node_index("b").unwrap();
        let a = graph.node_index("a").unwrap();
        assert!(scores[b] > scores[a], "cited node should rank higher");
    }

    #[test]
    fn test_rank_propagation_empty_graph() {
        let graph = RelationshipGraph::new(true);
        let analyzer = GraphAnalyzer::default();
        assert!(analyzer.rank_propagation(&graph).is_empty());
    }

    #[test]
    fn test_degree_centrality_directed() {
        // a -> b -> c: b touches both others.
        let mut graph = RelationshipGraph::new(true);
        graph.add_edge("a", "b");
        graph.add_edge("b", "c");
        let centrality = degree_centrality(&graph);
        assert!((centrality[1] - 1.0).abs() < 1e-12);
        assert!((centrality[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_betweenness_middle_of_path() {
        // a -> b -> c: b sits on the only a..c path.
        let mut graph = RelationshipGraph::new(true);
        graph.add_edge("a", "b");
        graph.add_edge("b", "c");
        let centrality = betweenness_centrality(&graph);
        assert!((centrality[1] - 0.5).abs() < 1e-12);
        assert!(centrality[0].abs() < 1e-12);
        assert!(centrality[2].abs() < 1e-12);
    }

    #[test]
    fn test_eigenvector_symmetric_triangle() {
        let mut graph = RelationshipGraph::new(false);
        graph.add_shared_edge("a", "b");
        graph.add_shared_edge("b", "c");
        graph.add_shared_edge("c", "a");
        let analyzer = GraphAnalyzer::default();
        let scores = analyzer.eigenvector_centrality(&graph);
        assert!((scores[0] - scores[1]).abs() < 1e-6);
        assert!((scores[1] - scores[2]).abs() < 1e-6);
    }

    #[test]
    fn test_eigenvector_edgeless_graph_is_zero() {
        let mut graph = RelationshipGraph::new(false);
        graph.add_node("loner");
        let analyzer = GraphAnalyzer::default();
        assert_eq!(analyzer.eigenvector_centrality(&graph), vec![0.0]);
    }

    #[test]
    fn test_clustering_triangle() {
        let mut graph = RelationshipGraph::new(false);
        graph.add_shared_edge("a", "b");
        graph.add_shared_edge("b", "c");
        graph.add_shared_edge("c", "a");
        assert!((graph.average_clustering() - 1.0).abs() < 1e-12);
    }
}
