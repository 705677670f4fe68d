//! The current link of every defaults chain.
//!
//! A `set_*` directive never mutates the value records already point at: it
//! builds the next value from the current one and swaps the `Rc`.

use std::rc::Rc;

use crate::types::{
    BeamDefaults, BeamDefaultsScale, DefaultMinimass, Inertia, ManagedMaterialsOptions,
    NodeDefaults, NodeOptions,
};

/// Values read from a `set_node_defaults` line. `None` keeps the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NodeDefaultsUpdate {
    pub load_weight: Option<f32>,
    pub friction: Option<f32>,
    pub volume: Option<f32>,
    pub surface: Option<f32>,
    pub options: Option<NodeOptions>,
}

/// Values read from a `set_beam_defaults` line. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BeamDefaultsUpdate {
    pub springiness: Option<f32>,
    pub damping_constant: Option<f32>,
    pub deformation_threshold: Option<f32>,
    pub breaking_threshold: Option<f32>,
    pub visual_beam_diameter: Option<f32>,
    pub beam_material_name: Option<String>,
    pub plastic_deform_coef: Option<f32>,
}

/// Negative numbers mean "keep the current value".
fn non_negative(value: Option<f32>) -> Option<f32> {
    value.filter(|v| *v >= 0.0)
}

#[derive(Debug, Clone)]
pub struct DefaultsContext {
    pub node: Rc<NodeDefaults>,
    pub beam: Rc<BeamDefaults>,
    pub inertia: Rc<Inertia>,
    pub minimass: Option<Rc<DefaultMinimass>>,
    pub managed_materials: ManagedMaterialsOptions,
    pub detacher_group: i32,
}

impl Default for DefaultsContext {
    fn default() -> Self {
        Self {
            node: Rc::new(NodeDefaults::default()),
            beam: Rc::new(BeamDefaults::default()),
            inertia: Rc::new(Inertia::default()),
            minimass: None,
            managed_materials: ManagedMaterialsOptions::default(),
            detacher_group: 0,
        }
    }
}

impl DefaultsContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_node_defaults(&mut self, update: NodeDefaultsUpdate) {
        let prev = &self.node;
        self.node = Rc::new(NodeDefaults {
            load_weight: non_negative(update.load_weight).unwrap_or(prev.load_weight),
            friction: non_negative(update.friction).unwrap_or(prev.friction),
            volume: non_negative(update.volume).unwrap_or(prev.volume),
            surface: non_negative(update.surface).unwrap_or(prev.surface),
            options: update.options.unwrap_or(prev.options),
        });
    }

    pub fn set_beam_defaults(&mut self, update: BeamDefaultsUpdate, advanced_deformation: bool) {
        let prev = &self.beam;
        let plastic = non_negative(update.plastic_deform_coef);
        self.beam = Rc::new(BeamDefaults {
            springiness: non_negative(update.springiness).unwrap_or(prev.springiness),
            damping_constant: non_negative(update.damping_constant)
                .unwrap_or(prev.damping_constant),
            deformation_threshold: non_negative(update.deformation_threshold)
                .unwrap_or(prev.deformation_threshold),
            breaking_threshold: non_negative(update.breaking_threshold)
                .unwrap_or(prev.breaking_threshold),
            visual_beam_diameter: non_negative(update.visual_beam_diameter)
                .unwrap_or(prev.visual_beam_diameter),
            beam_material_name: update
                .beam_material_name
                .unwrap_or_else(|| prev.beam_material_name.clone()),
            plastic_deform_coef: plastic.unwrap_or(prev.plastic_deform_coef),
            scale: prev.scale.clone(),
            enable_advanced_deformation: advanced_deformation,
            is_user_defined: true,
            is_plastic_deform_coef_user_defined: plastic.is_some()
                || prev.is_plastic_deform_coef_user_defined,
        });
    }

    pub fn set_beam_defaults_scale(&mut self, scale: BeamDefaultsScale) {
        let mut next = BeamDefaults::clone(&self.beam);
        next.scale = scale;
        self.beam = Rc::new(next);
    }

    /// A negative delay puts the whole chain back to the engine seed.
    pub fn set_inertia_defaults(
        &mut self,
        start_delay: f32,
        stop_delay: Option<f32>,
        start_function: Option<String>,
        stop_function: Option<String>,
    ) {
        if start_delay < 0.0 || stop_delay.is_some_and(|d| d < 0.0) {
            self.inertia = Rc::new(Inertia::default());
            return;
        }
        let prev = &self.inertia;
        self.inertia = Rc::new(Inertia {
            start_delay_factor: start_delay,
            stop_delay_factor: stop_delay.unwrap_or(prev.stop_delay_factor),
            start_function: start_function.unwrap_or_else(|| prev.start_function.clone()),
            stop_function: stop_function.unwrap_or_else(|| prev.stop_function.clone()),
        });
    }

    pub fn set_default_minimass(&mut self, min_mass_kg: f32) {
        self.minimass = Some(Rc::new(DefaultMinimass { min_mass_kg }));
    }

    pub fn set_managed_materials_options(&mut self, double_sided: bool) {
        self.managed_materials = ManagedMaterialsOptions { double_sided };
    }

    pub fn set_detacher_group(&mut self, group: i32) {
        self.detacher_group = group;
    }
}
