mod common;

use common::*;
use rand::{rngs::SmallRng, SeedableRng};
use rusty_gan::{
    optimizer::GradientDescent, Batch, Device, Gan, GanConfig, GanError, SampleShape,
};

fn rng() -> SmallRng {
    SmallRng::seed_from_u64(42)
}

fn close(a: f32, b: f32, tolerance: f32) -> bool {
    (a - b).abs() < tolerance
}

#[test]
fn confident_discriminator_has_near_zero_loss() {
    // d_real = 5 * 4 - 10 = 10, d_fake = -10
    let mut gan = fixed_gan(5., -10.);
    let x_real = ones(8);
    let loss = gan.loss_nonsaturating(&x_real, Device::Cpu, &mut rng()).unwrap();

    assert!(loss.d_real().iter().all(|x| close(*x, 10., 1e-5)));
    assert!(loss.d_fake().iter().all(|x| close(*x, -10., 1e-5)));
    assert!(loss.real_term() < 1e-4);
    // softplus(-10), not rounded away
    assert!((loss.real_term() / 4.5399e-5 - 1.).abs() < 1e-3, "{}", loss.real_term());
    assert!(loss.fake_term() < 1e-4);
    assert!(close(loss.d_loss, 9.08e-5, 1e-6), "d_loss was {}", loss.d_loss);
    // the rejected generator pays for it
    assert!(close(loss.g_loss, 10.000_045, 1e-4), "g_loss was {}", loss.g_loss);
}

#[test]
fn losses_are_never_negative() {
    let x_real = pattern(16);
    for seed in 0..8 {
        let mut gan = Gan::from_config(&small_config(seed)).unwrap();
        let mut rng = SmallRng::seed_from_u64(seed);
        let loss = gan.loss_nonsaturating(&x_real, Device::Cpu, &mut rng).unwrap();
        assert!(loss.d_loss >= 0. && loss.g_loss >= 0., "{:?}", loss.pair());
    }

    let x_real = ones(4);
    for &(w, b) in &[(40., -80.), (-40., 80.), (0., 0.)] {
        let loss = fixed_gan(w, b)
            .loss_nonsaturating(&x_real, Device::Cpu, &mut rng())
            .unwrap();
        assert!(loss.d_loss.is_finite() && loss.d_loss >= 0.);
        assert!(loss.g_loss.is_finite() && loss.g_loss >= 0.);
    }
}

#[test]
fn d_loss_follows_separation() {
    let x_real = ones(4);
    let d_loss = |w, b| {
        fixed_gan(w, b)
            .loss_nonsaturating(&x_real, Device::Cpu, &mut rng())
            .unwrap()
            .d_loss
    };
    let separating = d_loss(5., -10.);
    let uninformative = d_loss(0., 0.);
    let inverted = d_loss(-5., 10.);

    assert!(close(uninformative, 2. * std::f32::consts::LN_2, 1e-5));
    assert!(separating < uninformative);
    assert!(uninformative < inverted);
}

#[test]
fn default_model_on_mnist_sized_batch() {
    let config = GanConfig {
        seed: 7,
        ..GanConfig::default()
    };
    let mut gan = Gan::from_config(&config).unwrap();
    let x_real = Batch::from_fn(64, SampleShape::new(1, 28, 28), |s, i| {
        ((s + i) % 17) as f32 / 16.
    });
    let loss = gan.loss_nonsaturating(&x_real, Device::Cpu, &mut rng()).unwrap();

    assert!(loss.d_loss.is_finite());
    assert!(loss.g_loss.is_finite());
    assert_eq!(loss.z().len(), 64 * 2);
    assert_eq!(loss.x_fake().dims(), [64, 1, 28, 28]);
}

#[test]
fn same_seed_same_losses() {
    let x_real = pattern(10);
    let eval = |seed| {
        let mut gan = Gan::from_config(&small_config(3)).unwrap();
        let mut rng = SmallRng::seed_from_u64(seed);
        gan.loss_nonsaturating(&x_real, Device::Cpu, &mut rng)
            .unwrap()
            .pair()
    };
    assert_eq!(eval(1), eval(1));
    assert_ne!(eval(1), eval(2));
}

#[test]
fn rejects_bad_inputs() {
    let mut gan = fixed_gan(1., 0.);

    let err = gan
        .loss_nonsaturating(&ones(4), Device::Cuda(0), &mut rng())
        .unwrap_err();
    assert_eq!(err, GanError::DeviceUnavailable(Device::Cuda(0)));

    let empty = Batch::zeros(0, SHAPE);
    let err = gan
        .loss_nonsaturating(&empty, Device::Cpu, &mut rng())
        .unwrap_err();
    assert_eq!(err, GanError::EmptyBatch);

    let wrong = Batch::zeros(3, SampleShape::new(1, 3, 3));
    let err = gan
        .loss_nonsaturating(&wrong, Device::Cpu, &mut rng())
        .unwrap_err();
    assert_eq!(
        err,
        GanError::ShapeMismatch {
            expected: SHAPE,
            received: SampleShape::new(1, 3, 3)
        }
    );
    assert_eq!(gan.step(), 0);
}

#[test]
fn gradient_steps_lower_both_losses() {
    let x_real = pattern(12);
    let mut gan = Gan::from_config(&small_config(5)).unwrap();
    let mut alg = GradientDescent::new(0.05);
    let eval = |gan: &mut Gan| {
        let mut rng = SmallRng::seed_from_u64(11);
        let loss = gan.loss_nonsaturating(&x_real, Device::Cpu, &mut rng).unwrap();
        (loss.d_loss, loss.g_loss)
    };

    let (d_before, _) = eval(&mut gan);
    {
        let loss = gan
            .loss_nonsaturating(&x_real, Device::Cpu, &mut SmallRng::seed_from_u64(11))
            .unwrap();
        gan.backward_discriminator(&loss);
    }
    gan.update_discriminator(&mut alg);
    let (d_after, g_before) = eval(&mut gan);
    assert!(d_after < d_before, "d_loss went from {} to {}", d_before, d_after);

    {
        let loss = gan
            .loss_nonsaturating(&x_real, Device::Cpu, &mut SmallRng::seed_from_u64(11))
            .unwrap();
        gan.backward_generator(&loss);
    }
    gan.update_generator(&mut alg);
    let (_, g_after) = eval(&mut gan);
    assert!(g_after < g_before, "g_loss went from {} to {}", g_before, g_after);
}

#[test]
fn rejected_fakes_still_teach_the_generator() {
    let x_real = ones(4);

    let mut gan = fixed_gan(5., -10.);
    let loss = gan.loss_nonsaturating(&x_real, Device::Cpu, &mut rng()).unwrap();
    gan.backward_generator(&loss);
    let nonsaturating: f32 = gan.generator_gradients().iter().map(|g| g.abs()).sum();

    let mut gan = fixed_gan(5., -10.);
    let loss = gan.loss_saturating(&x_real, Device::Cpu, &mut rng()).unwrap();
    gan.backward_generator(&loss);
    let minimax: f32 = gan.generator_gradients().iter().map(|g| g.abs()).sum();

    assert!(nonsaturating > 1., "non-saturating gradient was {}", nonsaturating);
    assert!(minimax < 1e-2, "minimax gradient was {}", minimax);
    // same discriminator loss either way
    assert_eq!(
        gan.loss_saturating(&x_real, Device::Cpu, &mut rng()).unwrap().d_loss,
        fixed_gan(5., -10.)
            .loss_nonsaturating(&x_real, Device::Cpu, &mut rng())
            .unwrap()
            .d_loss
    );
}
