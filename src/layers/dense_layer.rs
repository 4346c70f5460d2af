use crate::{
    a_funcs::{ActivFunc, Activation},
    initializer::{Initializer, Xavier},
    layers::{Layer, LayerBuilder, Shape},
    storage::{Allocator, GradStorage, Handle, WeightStorage},
};

/// Your run of the mill fully connected (dense) layer
#[derive(Debug, Clone)]
pub struct DenseLayer<F = Activation> {
    in_size: usize,
    size: usize,

    weights: Handle,
    biases: Handle,

    update_weights: bool,
    update_biases: bool,

    weighted_inputs: Vec<f32>,
    activations: Vec<f32>,
    temp: Vec<f32>,

    a_func: F,
}

impl<F> Layer for DenseLayer<F>
where
    F: ActivFunc,
{
    fn eval(&mut self, input: &[f32], weights: &WeightStorage) -> &[f32] {
        let biases = weights.get(self.biases);
        let weights = weights.get(self.weights);

        // assert dominance
        assert_eq!(weights.len(), self.in_size * self.size);
        assert_eq!(biases.len(), self.size);
        assert_eq!(input.len(), self.in_size);

        for ((row, b), wi) in weights
            .chunks_exact(self.in_size)
            .zip(biases)
            .zip(&mut self.weighted_inputs)
        {
            *wi = row.iter().zip(input).map(|(w, i)| w * i).sum::<f32>() + b;
        }

        for (wi, o) in self.weighted_inputs.iter().zip(&mut self.activations) {
            *o = self.a_func.evaluate(*wi);
        }

        &self.activations
    }

    fn calc_gradients(
        &mut self,
        input: &[f32],
        weights: &WeightStorage,
        gradients: &mut GradStorage,
        in_grads: &[f32],
        out_grads: &mut [f32],
    ) {
        let weights = weights.get(self.weights);

        // assert dominance
        assert_eq!(weights.len(), self.in_size * self.size);
        assert_eq!(input.len(), self.in_size);
        assert_eq!(in_grads.len(), self.size);
        assert_eq!(out_grads.len(), self.in_size);

        // compute activation function derivatives
        for (((temp, inp), out), id) in self
            .temp
            .iter_mut()
            .zip(&self.weighted_inputs)
            .zip(&self.activations)
            .zip(in_grads)
        {
            *temp = self.a_func.derivative(*inp, *out) * *id;
        }

        // compute bias derivatives
        if self.update_biases {
            for (bd, temp) in gradients.get_mut(self.biases).iter_mut().zip(&self.temp) {
                *bd += *temp;
            }
        }

        // compute weight derivative
        if self.update_weights {
            for (wds, temp) in gradients
                .get_mut(self.weights)
                .chunks_exact_mut(self.in_size)
                .zip(&self.temp)
            {
                for (wd, inp) in wds.iter_mut().zip(input) {
                    *wd += *inp * *temp;
                }
            }
        }

        //compute output derivatives
        for (row, temp) in weights.chunks_exact(self.in_size).zip(&self.temp) {
            for (od, w) in out_grads.iter_mut().zip(row) {
                *od += *w * *temp;
            }
        }
    }

    fn activations(&self) -> &[f32] {
        &self.activations
    }

    fn input(&self) -> Shape {
        Shape::new(self.in_size)
    }

    fn output(&self) -> Shape {
        Shape::new(self.size)
    }
}

impl<F> DenseLayer<F> {
    pub fn new<I>(
        a_func: F,
        init: I,
        alloc: &mut Allocator,
        in_size: usize,
        size: usize,
        update_w: bool,
        update_b: bool,
    ) -> Self
    where
        I: Initializer,
    {
        let weights = alloc.allocate(in_size * size, init.construct(in_size, size));
        let biases = alloc.allocate_zeroed(size);

        Self {
            in_size,
            size,
            weights,
            biases,
            update_weights: update_w,
            update_biases: update_b,
            weighted_inputs: vec![0.; size],
            activations: vec![0.; size],
            temp: vec![0.; size],
            a_func,
        }
    }

    pub fn a_func(&self) -> &F {
        &self.a_func
    }
}

pub struct DenseBuilder<F = Activation, I = Xavier> {
    a_func: F,
    init: I,
    size: usize,
    update_w: bool,
    update_b: bool,
}

impl<F, I> DenseBuilder<F, I> {
    pub fn new(a_func: F, init: I, size: usize, update_w: bool, update_b: bool) -> Self {
        DenseBuilder {
            a_func,
            init,
            size,
            update_w,
            update_b,
        }
    }
}

impl<F, I> LayerBuilder for DenseBuilder<F, I>
where
    F: ActivFunc,
    I: Initializer,
{
    type Output = DenseLayer<F>;

    fn connect(self, input: Shape, alloc: &mut Allocator) -> Self::Output {
        DenseLayer::new(
            self.a_func,
            self.init,
            alloc,
            input.size(),
            self.size,
            self.update_w,
            self.update_b,
        )
    }
}
