use dinic::{Dinic, MaxFlow, PushRelabel, ResidualGraph};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

type EdgeList = Vec<(usize, usize, u32)>;

fn random_edges(rng: &mut StdRng, n: usize, density: f64) -> EdgeList {
    let mut edges = Vec::new();
    for u in 0..n {
        for v in 0..n {
            if u != v && rng.gen_bool(density) {
                edges.push((u, v, rng.gen_range(0..=20)));
            }
        }
    }
    edges
}

fn build(n: usize, edges: &EdgeList) -> Result<ResidualGraph<usize, u32>, dinic::Error> {
    let mut graph = ResidualGraph::new();
    for u in 0..n {
        graph.add_node(u);
    }
    for &(u, v, c) in edges {
        graph.add_edge(u, v, c)?;
    }
    Ok(graph)
}

/// Minimum s-t cut by enumerating every node set that holds the source but not the sink.
fn brute_force_min_cut(n: usize, edges: &EdgeList, source: usize, sink: usize) -> u32 {
    (0u32..1 << n)
        .filter(|set| set & (1 << source) != 0 && set & (1 << sink) == 0)
        .map(|set| {
            edges
                .iter()
                .filter(|&&(u, v, _)| set & (1 << u) != 0 && set & (1 << v) == 0)
                .map(|&(_, _, c)| c)
                .sum::<u32>()
        })
        .min()
        .unwrap_or(0)
}

#[test]
fn test_dinic_matches_min_cut() -> Result<(), dinic::Error> {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for round in 0..300 {
        let n = rng.gen_range(2..=7);
        let density = rng.gen_range(0.1..0.7);
        let edges = random_edges(&mut rng, n, density);
        let (source, sink) = (0, n - 1);

        let mut graph = build(n, &edges)?;
        let value = Dinic::new().max_flow(&mut graph, &source, &sink)?;
        assert_eq!(
            value,
            brute_force_min_cut(n, &edges, source, sink),
            "round {round}: {edges:?}"
        );
        graph.check(&source, &sink)?;
    }
    Ok(())
}

#[test]
fn test_algorithms_agree() -> Result<(), dinic::Error> {
    let mut rng = StdRng::seed_from_u64(42);
    for round in 0..100 {
        let n = rng.gen_range(5..=40);
        let density = rng.gen_range(0.05..0.3);
        let edges = random_edges(&mut rng, n, density);
        let (source, sink) = (0, n - 1);

        let mut by_dinic = build(n, &edges)?;
        let mut by_plain_dinic = build(n, &edges)?;
        let mut by_push_relabel = build(n, &edges)?;

        let expected = Dinic::new().max_flow(&mut by_dinic, &source, &sink)?;
        let mut plain = Dinic::new();
        plain.use_current_arc = false;
        assert_eq!(
            plain.max_flow(&mut by_plain_dinic, &source, &sink)?,
            expected,
            "round {round}"
        );
        assert_eq!(
            PushRelabel::new().max_flow(&mut by_push_relabel, &source, &sink)?,
            expected,
            "round {round}"
        );

        for graph in [&by_dinic, &by_plain_dinic, &by_push_relabel] {
            graph.check(&source, &sink)?;
            // push-relabel may route excess back into the source over an inserted arc
            let net = |node: usize| {
                let out: u32 = graph.flows().filter(|f| f.from == node).map(|f| f.flow).sum();
                let into: u32 = graph.flows().filter(|f| f.to == node).map(|f| f.flow).sum();
                (out, into)
            };
            let (sent, returned) = net(source);
            let (left, taken) = net(sink);
            assert_eq!(sent - returned, expected, "round {round}");
            assert_eq!(taken - left, expected, "round {round}");
        }
    }
    Ok(())
}

#[test]
fn test_pair_sums_are_preserved() -> Result<(), dinic::Error> {
    let mut rng = StdRng::seed_from_u64(7);
    let n = 25;
    let edges = random_edges(&mut rng, n, 0.2);
    let mut graph = build(n, &edges)?;

    let before = (0..n)
        .flat_map(|u| (0..n).map(move |v| (u, v)))
        .filter_map(|(u, v)| Some(graph.residual(&u, &v)? + graph.residual(&v, &u)?))
        .collect::<Vec<_>>();
    Dinic::new().max_flow(&mut graph, &0, &(n - 1))?;
    let after = (0..n)
        .flat_map(|u| (0..n).map(move |v| (u, v)))
        .filter_map(|(u, v)| Some(graph.residual(&u, &v)? + graph.residual(&v, &u)?))
        .collect::<Vec<_>>();

    assert_eq!(before, after);
    for f in graph.flows() {
        assert!(f.flow <= f.capacity);
    }
    Ok(())
}
