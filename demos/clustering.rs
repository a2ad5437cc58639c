//! SymNMF on a simple 2D dataset.

use symnmf::cluster::similarity;
use symnmf::{io, Clustering, SymNmf};

fn main() {
    // Three well-separated clusters in 2D.
    let data: Vec<Vec<f64>> = vec![
        // Cluster A (near origin)
        vec![0.0, 0.0],
        vec![0.1, 0.2],
        vec![0.2, 0.1],
        vec![-0.1, 0.1],
        // Cluster B (near (5, 5))
        vec![5.0, 5.0],
        vec![5.1, 4.9],
        vec![4.9, 5.1],
        vec![5.2, 5.2],
        // Cluster C (near (10, 0))
        vec![10.0, 0.0],
        vec![10.1, 0.1],
        vec![9.9, -0.1],
        vec![10.2, 0.2],
    ];

    let model = SymNmf::new(3).with_seed(42).with_tol(1e-10).with_max_iter(1000);
    let labels = model.fit_predict(&data).unwrap();
    println!("=== SymNMF (k=3) ===");
    for (i, label) in labels.iter().enumerate() {
        println!("  point {:2} ({:5.1}, {:5.1}) => cluster {}", i, data[i][0], data[i][1], label);
    }

    let points = symnmf::Matrix::from_rows(&data).unwrap();
    let w = similarity::normalized_similarity(&points).unwrap();
    println!("\n=== Normalized similarity (first 4 rows) ===");
    let head = symnmf::Matrix::from_rows(&w.to_rows()[..4]).unwrap();
    print!("{}", io::format_matrix(&head));
}
