// Generated conversions between the v1beta3 and internal packages.
// Run `convgen update --config schema/demo/convgen.toml` to refresh.

use super::*;
use crate::{ConversionError, Scheme, Scope, newer};

// AUTO-GENERATED FUNCTIONS START HERE
#[allow(non_snake_case, unused_variables)]
pub fn Convert_v1beta3_Container_To_api_Container(
    src: &Container,
    dst: &mut newer::Container,
    scope: &mut dyn Scope,
) -> Result<(), ConversionError> {
    dst.name = src.name.clone();
    dst.image = src.image.clone();
    dst.ports = src
        .ports
        .iter()
        .map(|value| -> Result<_, ConversionError> {
            Ok({
                let mut out: newer::ContainerPort = Default::default();
                Convert_v1beta3_ContainerPort_To_api_ContainerPort(
                    value,
                    &mut out,
                    scope,
                )?;
                out
            })
        })
        .collect::<Result<Vec<_>, ConversionError>>()?;
    dst.resources = src
        .resources
        .iter()
        .map(|(key, value)| -> Result<_, ConversionError> {
            Ok((
                key.clone(),
                {
                    let mut out: newer::Quantity = Default::default();
                    convert_quantity_v1beta3_to_api(value, &mut out, scope)?;
                    out
                },
            ))
        })
        .collect::<Result<::std::collections::BTreeMap<_, _>, ConversionError>>()?;
    Ok(())
}

#[allow(non_snake_case, unused_variables)]
pub fn Convert_api_Container_To_v1beta3_Container(
    src: &newer::Container,
    dst: &mut Container,
    scope: &mut dyn Scope,
) -> Result<(), ConversionError> {
    dst.name = src.name.clone();
    dst.image = src.image.clone();
    dst.ports = src
        .ports
        .iter()
        .map(|value| -> Result<_, ConversionError> {
            Ok({
                let mut out: ContainerPort = Default::default();
                Convert_api_ContainerPort_To_v1beta3_ContainerPort(
                    value,
                    &mut out,
                    scope,
                )?;
                out
            })
        })
        .collect::<Result<Vec<_>, ConversionError>>()?;
    dst.resources = src
        .resources
        .iter()
        .map(|(key, value)| -> Result<_, ConversionError> {
            Ok((
                key.clone(),
                {
                    let mut out: Quantity = Default::default();
                    convert_quantity_api_to_v1beta3(value, &mut out, scope)?;
                    out
                },
            ))
        })
        .collect::<Result<::std::collections::BTreeMap<_, _>, ConversionError>>()?;
    Ok(())
}

#[allow(non_snake_case, unused_variables)]
pub fn Convert_v1beta3_ContainerPort_To_api_ContainerPort(
    src: &ContainerPort,
    dst: &mut newer::ContainerPort,
    scope: &mut dyn Scope,
) -> Result<(), ConversionError> {
    dst.name = src.name.clone();
    dst.containerPort = src.containerPort;
    dst.protocol = src.protocol.clone();
    Ok(())
}

#[allow(non_snake_case, unused_variables)]
pub fn Convert_api_ContainerPort_To_v1beta3_ContainerPort(
    src: &newer::ContainerPort,
    dst: &mut ContainerPort,
    scope: &mut dyn Scope,
) -> Result<(), ConversionError> {
    dst.name = src.name.clone();
    dst.containerPort = src.containerPort;
    dst.protocol = src.protocol.clone();
    Ok(())
}

#[allow(non_snake_case, unused_variables)]
pub fn Convert_v1beta3_HostPathVolumeSource_To_api_HostPathVolumeSource(
    src: &HostPathVolumeSource,
    dst: &mut newer::HostPathVolumeSource,
    scope: &mut dyn Scope,
) -> Result<(), ConversionError> {
    dst.path = src.path.clone();
    Ok(())
}

#[allow(non_snake_case, unused_variables)]
pub fn Convert_api_HostPathVolumeSource_To_v1beta3_HostPathVolumeSource(
    src: &newer::HostPathVolumeSource,
    dst: &mut HostPathVolumeSource,
    scope: &mut dyn Scope,
) -> Result<(), ConversionError> {
    dst.path = src.path.clone();
    Ok(())
}

#[allow(non_snake_case, unused_variables)]
pub fn Convert_v1beta3_ObjectMeta_To_api_ObjectMeta(
    src: &ObjectMeta,
    dst: &mut newer::ObjectMeta,
    scope: &mut dyn Scope,
) -> Result<(), ConversionError> {
    dst.name = src.name.clone();
    dst.namespace = src.namespace.clone();
    dst.labels = src.labels.clone();
    dst.generation = src.generation;
    Ok(())
}

#[allow(non_snake_case, unused_variables)]
pub fn Convert_api_ObjectMeta_To_v1beta3_ObjectMeta(
    src: &newer::ObjectMeta,
    dst: &mut ObjectMeta,
    scope: &mut dyn Scope,
) -> Result<(), ConversionError> {
    dst.name = src.name.clone();
    dst.namespace = src.namespace.clone();
    dst.labels = src.labels.clone();
    dst.generation = src.generation;
    Ok(())
}

#[allow(non_snake_case, unused_variables)]
pub fn Convert_v1beta3_Pod_To_api_Pod(
    src: &Pod,
    dst: &mut newer::Pod,
    scope: &mut dyn Scope,
) -> Result<(), ConversionError> {
    Convert_v1beta3_ObjectMeta_To_api_ObjectMeta(
        &src.metadata,
        &mut dst.metadata,
        scope,
    )?;
    Convert_v1beta3_PodSpec_To_api_PodSpec(&src.spec, &mut dst.spec, scope)?;
    Ok(())
}

#[allow(non_snake_case, unused_variables)]
pub fn Convert_api_Pod_To_v1beta3_Pod(
    src: &newer::Pod,
    dst: &mut Pod,
    scope: &mut dyn Scope,
) -> Result<(), ConversionError> {
    Convert_api_ObjectMeta_To_v1beta3_ObjectMeta(
        &src.metadata,
        &mut dst.metadata,
        scope,
    )?;
    Convert_api_PodSpec_To_v1beta3_PodSpec(&src.spec, &mut dst.spec, scope)?;
    Ok(())
}

#[allow(non_snake_case, unused_variables)]
pub fn Convert_v1beta3_PodSpec_To_api_PodSpec(
    src: &PodSpec,
    dst: &mut newer::PodSpec,
    scope: &mut dyn Scope,
) -> Result<(), ConversionError> {
    dst.volumes = src
        .volumes
        .iter()
        .map(|value| -> Result<_, ConversionError> {
            Ok({
                let mut out: newer::Volume = Default::default();
                Convert_v1beta3_Volume_To_api_Volume(value, &mut out, scope)?;
                out
            })
        })
        .collect::<Result<Vec<_>, ConversionError>>()?;
    dst.containers = src
        .containers
        .iter()
        .map(|value| -> Result<_, ConversionError> {
            Ok({
                let mut out: newer::Container = Default::default();
                Convert_v1beta3_Container_To_api_Container(value, &mut out, scope)?;
                out
            })
        })
        .collect::<Result<Vec<_>, ConversionError>>()?;
    dst.restartPolicy = src.restartPolicy.clone();
    dst.nodeSelector = src.nodeSelector.clone();
    Ok(())
}

#[allow(non_snake_case, unused_variables)]
pub fn Convert_api_PodSpec_To_v1beta3_PodSpec(
    src: &newer::PodSpec,
    dst: &mut PodSpec,
    scope: &mut dyn Scope,
) -> Result<(), ConversionError> {
    dst.volumes = src
        .volumes
        .iter()
        .map(|value| -> Result<_, ConversionError> {
            Ok({
                let mut out: Volume = Default::default();
                Convert_api_Volume_To_v1beta3_Volume(value, &mut out, scope)?;
                out
            })
        })
        .collect::<Result<Vec<_>, ConversionError>>()?;
    dst.containers = src
        .containers
        .iter()
        .map(|value| -> Result<_, ConversionError> {
            Ok({
                let mut out: Container = Default::default();
                Convert_api_Container_To_v1beta3_Container(value, &mut out, scope)?;
                out
            })
        })
        .collect::<Result<Vec<_>, ConversionError>>()?;
    dst.restartPolicy = src.restartPolicy.clone();
    dst.nodeSelector = src.nodeSelector.clone();
    Ok(())
}

#[allow(non_snake_case, unused_variables)]
pub fn Convert_v1beta3_Volume_To_api_Volume(
    src: &Volume,
    dst: &mut newer::Volume,
    scope: &mut dyn Scope,
) -> Result<(), ConversionError> {
    dst.name = src.name.clone();
    dst.hostPath = match src.hostPath.as_deref() {
        Some(value) => {
            Some(
                Box::new({
                    let mut out: newer::HostPathVolumeSource = Default::default();
                    Convert_v1beta3_HostPathVolumeSource_To_api_HostPathVolumeSource(
                        value,
                        &mut out,
                        scope,
                    )?;
                    out
                }),
            )
        }
        None => None,
    };
    Ok(())
}

#[allow(non_snake_case, unused_variables)]
pub fn Convert_api_Volume_To_v1beta3_Volume(
    src: &newer::Volume,
    dst: &mut Volume,
    scope: &mut dyn Scope,
) -> Result<(), ConversionError> {
    dst.name = src.name.clone();
    dst.hostPath = match src.hostPath.as_deref() {
        Some(value) => {
            Some(
                Box::new({
                    let mut out: HostPathVolumeSource = Default::default();
                    Convert_api_HostPathVolumeSource_To_v1beta3_HostPathVolumeSource(
                        value,
                        &mut out,
                        scope,
                    )?;
                    out
                }),
            )
        }
        None => None,
    };
    Ok(())
}
// AUTO-GENERATED FUNCTIONS END HERE

pub fn register(scheme: &mut Scheme) -> Result<(), ConversionError> {
	scheme.add_generated_conversion_funcs(
		Convert_v1beta3_Container_To_api_Container,
		Convert_api_Container_To_v1beta3_Container,
		Convert_v1beta3_ContainerPort_To_api_ContainerPort,
		Convert_api_ContainerPort_To_v1beta3_ContainerPort,
		Convert_v1beta3_HostPathVolumeSource_To_api_HostPathVolumeSource,
		Convert_api_HostPathVolumeSource_To_v1beta3_HostPathVolumeSource,
		Convert_v1beta3_ObjectMeta_To_api_ObjectMeta,
		Convert_api_ObjectMeta_To_v1beta3_ObjectMeta,
		Convert_v1beta3_Pod_To_api_Pod,
		Convert_api_Pod_To_v1beta3_Pod,
		Convert_v1beta3_PodSpec_To_api_PodSpec,
		Convert_api_PodSpec_To_v1beta3_PodSpec,
		Convert_v1beta3_Volume_To_api_Volume,
		Convert_api_Volume_To_v1beta3_Volume,
	)
}
