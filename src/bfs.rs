use petgraph::graphmap::DiGraphMap;
use petgraph::visit::Bfs;

use crate::LinkId;

// BFS traversal of the link graph
// Returns link ids in the order they were visited
// every parent link is visited before its children
pub(super) fn bfs(graph: &DiGraphMap<LinkId, ()>, start: LinkId) -> Vec<LinkId> {
    let mut bfs = Bfs::new(graph, start);
    let mut order = Vec::with_capacity(graph.node_count());
    while let Some(link) = bfs.next(graph) {
        order.push(link);
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parents_first_test() {
        let mut graph = DiGraphMap::<LinkId, ()>::new();
        graph.add_edge(0, 1, ());
        graph.add_edge(1, 2, ());
        graph.add_edge(0, 3, ());
        let order = bfs(&graph, 0);
        assert_eq!(order.len(), 4);
        assert_eq!(order[0], 0);
        let pos = |n: LinkId| order.iter().position(|&x| x == n).unwrap();
        assert!(pos(1) < pos(2));
        assert!(pos(0) < pos(3));
    }

    #[test]
    fn single_node_test() {
        let mut graph = DiGraphMap::<LinkId, ()>::new();
        graph.add_node(0);
        assert_eq!(bfs(&graph, 0), vec![0]);
    }
}
