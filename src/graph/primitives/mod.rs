mod dijkstra;

pub use dijkstra::Dijkstra;
