use ferrite_grow::{train_sweep, total_absolute_error, Network, Sgd};

fn main() -> ferrite_grow::Result<()> {
    env_logger::init();

    let mut network = Network::with_seed(&[2, 4, 1], 42)?;

    let inputs = vec![
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
        vec![0.0, 0.0],
    ];
    let expected_outputs = vec![
        vec![1.0],
        vec![-1.0],
        vec![1.0],
        vec![-1.0],
    ];

    let optimizer = Sgd::new(0.1);
    let epochs = 10000;

    for epoch in 0..epochs {
        train_sweep(&mut network, &inputs, &expected_outputs, &optimizer)?;
        if epoch % 1000 == 0 {
            let error = total_absolute_error(&mut network, &inputs, &expected_outputs)?;
            println!("Epoch {epoch}: total |error| = {error:.6}");
        }
    }

    for input in &inputs {
        println!("Input: {:?} -> Output: {:.4}", input, network.predict(input)?[0]);
    }
    Ok(())
}
