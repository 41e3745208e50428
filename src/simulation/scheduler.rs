//! Vehicle scheduling for the junction simulation
//!
//! Each vehicle holds at most one in-flight [`MotionLeg`]. The scheduler keeps
//! an agenda of `(due_at, vehicle)` entries; stepping to a time completes every
//! leg due by then in order and immediately plans the vehicle's next leg.
//! Cancelling a leg removes its agenda entry, so a cancelled leg never
//! completes.

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::Rng;
use rand::SeedableRng;
use std::collections::{BTreeMap, BTreeSet};

use super::config::Density;
use super::signal::SignalController;
use super::types::{
    Direction, Lane, Position, VehicleId, VehicleKind, ROAD_EXTENT, WAITING_OFFSET,
};
use super::vehicle::{leg_duration_ms, SimVehicle};

/// Counters describing scheduler activity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Legs that ran to completion
    pub legs_completed: u64,
    /// Completed legs that ended queued at a light
    pub legs_waiting: u64,
    /// Times a vehicle was given a new direction and lane
    pub respawns: u64,
    /// Times a vehicle left the road end and came back on at the far end
    pub reentries: u64,
    /// Legs that were cancelled before completing
    pub legs_cancelled: u64,
    /// Full population regenerations
    pub population_resets: u64,
}

/// Owns the vehicle population and drives its motion cycles
pub struct VehicleScheduler {
    vehicles: BTreeMap<VehicleId, SimVehicle>,

    /// Pending leg completions ordered by due time
    agenda: BTreeSet<(u64, VehicleId)>,

    /// Next ID to assign; never reused across resets
    next_id: u32,

    /// Optional seeded RNG for reproducible simulations
    rng: Option<StdRng>,

    stats: SchedulerStats,
}

impl Default for VehicleScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl VehicleScheduler {
    fn new_internal(rng: Option<StdRng>) -> Self {
        Self {
            vehicles: BTreeMap::new(),
            agenda: BTreeSet::new(),
            next_id: 0,
            rng,
            stats: SchedulerStats::default(),
        }
    }

    pub fn new() -> Self {
        Self::new_internal(None)
    }

    /// Create a scheduler with a seeded RNG for reproducible simulations
    pub fn new_with_seed(seed: u64) -> Self {
        Self::new_internal(Some(StdRng::seed_from_u64(seed)))
    }

    /// Get a random value in the given range, using seeded RNG if available
    fn random_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distr::uniform::SampleUniform,
        R: rand::distr::uniform::SampleRange<T>,
    {
        match &mut self.rng {
            Some(rng) => rng.random_range(range),
            None => rand::rng().random_range(range),
        }
    }

    /// Choose a random element from a non-empty slice, using seeded RNG if available
    fn choose_random<T: Copy>(&mut self, slice: &[T]) -> Option<T> {
        match &mut self.rng {
            Some(rng) => slice.choose(rng).copied(),
            None => slice.choose(&mut rand::rng()).copied(),
        }
    }

    fn random_direction(&mut self) -> Direction {
        self.choose_random(&Direction::ALL)
            .unwrap_or(Direction::North)
    }

    fn random_lane(&mut self) -> Lane {
        self.choose_random(&Lane::ALL).unwrap_or(Lane::Right)
    }

    fn random_kind(&mut self) -> VehicleKind {
        let roll = self.random_range(0..VehicleKind::total_weight());
        VehicleKind::from_roll(roll)
    }

    fn next_vehicle_id(&mut self) -> VehicleId {
        let id = VehicleId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn vehicles(&self) -> impl Iterator<Item = &SimVehicle> {
        self.vehicles.values()
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&SimVehicle> {
        self.vehicles.get(&id)
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Number of legs currently in flight
    pub fn pending_legs(&self) -> usize {
        self.agenda.len()
    }

    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    /// Discard every vehicle and generate a fresh population for `density`.
    /// No completion logic runs for legs that were in flight.
    pub fn reset_population(&mut self, density: Density) {
        self.agenda.clear();
        self.vehicles.clear();

        for _ in 0..density.vehicle_count() {
            let id = self.next_vehicle_id();
            let kind = self.random_kind();
            let direction = self.random_direction();
            let lane = self.random_lane();
            let along = self.random_range(-ROAD_EXTENT..=-WAITING_OFFSET);
            let position = Position::on_axis(direction, along, lane.offset());
            self.vehicles
                .insert(id, SimVehicle::new(id, kind, position, direction, lane));
        }

        self.stats.population_resets += 1;
        info!(
            "Generated {} vehicles for {:?} density",
            self.vehicles.len(),
            density
        );
    }

    /// Cancel every in-flight leg, freezing vehicles where they are at `now`
    pub fn cancel_all(&mut self, now: u64) {
        self.stats.legs_cancelled += self.agenda.len() as u64;
        self.agenda.clear();
        for vehicle in self.vehicles.values_mut() {
            vehicle.cancel_leg(now);
        }
    }

    /// Cancel every in-flight leg and start a fresh cycle for each vehicle
    pub fn restart_all(&mut self, now: u64, signals: &SignalController, speed: f32) {
        self.cancel_all(now);
        let ids: Vec<VehicleId> = self.vehicles.keys().copied().collect();
        for id in ids {
            self.start_cycle(id, now, signals, speed);
        }
    }

    /// Plan and commit the next leg for one vehicle, starting at `now`
    fn start_cycle(&mut self, id: VehicleId, now: u64, signals: &SignalController, speed: f32) {
        let Some(vehicle) = self.vehicles.get_mut(&id) else {
            return;
        };

        if vehicle.reenter_if_off_road() {
            self.stats.reentries += 1;
            trace!("Vehicle {:?} re-entered on {:?}", id.0, vehicle.direction);
        }

        let plan = vehicle.plan(signals);
        if plan.waiting && !vehicle.waiting_at_light {
            debug!(
                "Vehicle {:?} queueing on {:?} approach ({:?})",
                id.0,
                vehicle.direction,
                signals.phase_for(vehicle.direction)
            );
        }

        let leg = vehicle.begin_leg(plan, now, leg_duration_ms(speed));
        self.agenda.insert((leg.due_at(), id));
    }

    /// Finish the leg of `id` and reassign its heading unless it is queued
    fn complete_leg(&mut self, id: VehicleId) {
        let was_waiting = match self.vehicles.get_mut(&id) {
            Some(vehicle) => {
                vehicle.complete_leg();
                vehicle.waiting_at_light
            }
            None => return,
        };

        self.stats.legs_completed += 1;
        if was_waiting {
            self.stats.legs_waiting += 1;
            return;
        }

        let direction = self.random_direction();
        let lane = self.random_lane();
        if let Some(vehicle) = self.vehicles.get_mut(&id) {
            vehicle.direction = direction;
            vehicle.lane = lane;
            self.stats.respawns += 1;
            trace!("Vehicle {:?} now heading {:?} in {:?} lane", id.0, direction, lane);
        }
    }

    /// Complete every leg due by `now`, planning each vehicle's next leg at the
    /// instant its previous one finished, then bring positions up to `now`
    pub fn step(&mut self, now: u64, signals: &SignalController, speed: f32) {
        while let Some(&(due, id)) = self.agenda.first() {
            if due > now {
                break;
            }
            self.agenda.remove(&(due, id));
            self.complete_leg(id);
            self.start_cycle(id, due, signals, speed);
        }

        for vehicle in self.vehicles.values_mut() {
            vehicle.sync_position(now);
        }
    }
}
