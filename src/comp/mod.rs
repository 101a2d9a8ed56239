pub mod volumetric_light;

pub use self::volumetric_light::VolumetricLight;
