#[cfg(test)]
#[path = "../../../tests/unit/models/common/load_test.rs"]
mod load_test;

use std::ops::{Add, Sub};

/// Amount of supported capacity dimensions.
const CAPACITY_DIMENSION_SIZE: usize = 8;

/// Specifies a multi dimensional load with a fixed amount of dimensions.
#[derive(Clone, Copy, Debug, Default)]
pub struct Capacity {
    load: [i32; CAPACITY_DIMENSION_SIZE],
    size: usize,
}

impl Capacity {
    /// Creates a new instance of `Capacity` from given dimension values.
    pub fn new(data: Vec<i32>) -> Self {
        assert!(data.len() <= CAPACITY_DIMENSION_SIZE);

        let mut load = [0; CAPACITY_DIMENSION_SIZE];
        load[..data.len()].copy_from_slice(&data);

        Self { load, size: data.len() }
    }

    /// Checks whether any dimension is set to non zero value.
    pub fn is_not_empty(&self) -> bool {
        self.size == 0 || self.load.iter().any(|v| *v != 0)
    }

    /// Returns pairwise max of dimension values.
    pub fn max_load(self, other: Self) -> Self {
        let mut result = self;
        result.load.iter_mut().zip(other.load.iter()).for_each(|(a, b)| *a = (*a).max(*b));
        result.size = self.size.max(other.size);

        result
    }

    /// Checks whether all dimension values of the other load fit into this one.
    pub fn can_fit(&self, other: &Self) -> bool {
        self.load.iter().zip(other.load.iter()).all(|(a, b)| a >= b)
    }

    fn get(&self, idx: usize) -> i32 {
        self.load[idx]
    }
}

impl Add for Capacity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        fn sum(a: i32, b: i32) -> i32 {
            a + b
        }

        apply(self, rhs, sum)
    }
}

impl Sub for Capacity {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        fn sub(a: i32, b: i32) -> i32 {
            a - b
        }

        apply(self, rhs, sub)
    }
}

impl PartialEq for Capacity {
    fn eq(&self, other: &Self) -> bool {
        self.load.iter().zip(other.load.iter()).all(|(a, b)| a == b)
    }
}

impl Eq for Capacity {}

fn apply(left: Capacity, right: Capacity, op: fn(i32, i32) -> i32) -> Capacity {
    let mut result = left;
    (0..CAPACITY_DIMENSION_SIZE).for_each(|idx| {
        result.load[idx] = op(left.get(idx), right.get(idx));
    });
    result.size = left.size.max(right.size);

    result
}

/// Represents a job demand, both static and dynamic.
#[derive(Clone, Copy, Debug, Default)]
pub struct Demand {
    /// An amount picked up at the stop: static is kept till the route end,
    /// dynamic is brought to some other stop within the tour.
    pub pickup: (Capacity, Capacity),
    /// An amount delivered at the stop: static is loaded at the route start,
    /// dynamic is brought from some other stop within the tour.
    pub delivery: (Capacity, Capacity),
}

impl Demand {
    /// Creates a demand of a job which delivers goods loaded at the route start.
    pub fn delivery(capacity: Capacity) -> Self {
        Self { delivery: (capacity, Capacity::default()), ..Default::default() }
    }

    /// Creates a demand of a job which picks goods up and keeps them till the route end.
    pub fn pickup(capacity: Capacity) -> Self {
        Self { pickup: (capacity, Capacity::default()), ..Default::default() }
    }

    /// Creates a demand of a pickup stop of a two stop job.
    pub fn shipment_pickup(capacity: Capacity) -> Self {
        Self { pickup: (Capacity::default(), capacity), ..Default::default() }
    }

    /// Creates a demand of a delivery stop of a two stop job.
    pub fn shipment_delivery(capacity: Capacity) -> Self {
        Self { delivery: (Capacity::default(), capacity), ..Default::default() }
    }

    /// Returns capacity change as difference between pickup and delivery.
    pub fn change(&self) -> Capacity {
        self.pickup.0 + self.pickup.1 - self.delivery.0 - self.delivery.1
    }
}
