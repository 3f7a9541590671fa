// demos/reference_scalar.rs

use ndarray::{arr2, Array2};
use weyl_engine::{kernel, weyl_electric_scalar, WeylEngine};

/// Evaluates the flat-metric reference point both directly and through the engine.
fn main() {
    let e = kernel::tensor_from_rows([[1.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 3.0]]);
    let g = kernel::SpatialTensor3::identity();
    println!("E_ij E_kl g^ik g^jl = {}", weyl_electric_scalar(&e, &g));

    let e_field = arr2(&[[1.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 3.0]]).into_dyn();
    let g_field = Array2::<f64>::eye(3).into_dyn();

    let mut engine = WeylEngine::new();
    match engine.evaluate("reference", e_field.view(), g_field.view()) {
        Ok(solution) => {
            println!("Engine result: {:?}", solution.values);
            for record in &solution.provenance_chain {
                println!("  - {} {}", record.event_type, record.data_hash);
            }
        }
        Err(e) => {
            println!("Evaluation failed: {}", e);
        }
    }
}
