/// Vertex shader for the instanced ornaments
///
/// Locations 3..=6 hold the per-instance matrix columns.
pub const ORNAMENT_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;
layout(location = 2) in vec3 a_color;
layout(location = 3) in mat4 a_instance_matrix;

uniform mat4 u_group;
uniform mat4 u_view;
uniform mat4 u_projection;

out vec3 v_world_position;
out vec3 v_normal;
out vec3 v_color;

void main() {
    mat4 model = u_group * a_instance_matrix;
    vec4 world_pos = model * vec4(a_position, 1.0);

    v_world_position = world_pos.xyz;
    v_normal = mat3(model) * a_normal;
    v_color = a_color;

    gl_Position = u_projection * u_view * world_pos;
}
"#;

/// Vertex shader for the star
pub const STAR_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;

uniform mat4 u_model;
uniform mat4 u_view;
uniform mat4 u_projection;
uniform vec3 u_color;

out vec3 v_world_position;
out vec3 v_normal;
out vec3 v_color;

void main() {
    vec4 world_pos = u_model * vec4(a_position, 1.0);

    v_world_position = world_pos.xyz;
    v_normal = mat3(u_model) * a_normal;
    v_color = u_color;

    gl_Position = u_projection * u_view * world_pos;
}
"#;

/// Shared lit fragment shader for ornaments and the star
pub const LIT_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec3 v_world_position;
in vec3 v_normal;
in vec3 v_color;

uniform vec3 u_camera_pos;
uniform float u_shininess;
uniform float u_specular_strength;
uniform float u_emissive_intensity;
uniform vec3 u_star_light_pos;
uniform float u_star_light_intensity;

out vec4 fragColor;

vec3 point_light(vec3 normal, vec3 view_dir, vec3 light_pos, vec3 light_color, float intensity) {
    vec3 to_light = light_pos - v_world_position;
    float dist = length(to_light);
    vec3 light_dir = to_light / dist;

    float ndotl = max(dot(normal, light_dir), 0.0);
    vec3 half_dir = normalize(light_dir + view_dir);
    float spec = pow(max(dot(normal, half_dir), 0.0), u_shininess);
    float falloff = intensity / (1.0 + dist * 0.05);

    return (v_color * ndotl + light_color * spec * u_specular_strength) * light_color * falloff;
}

void main() {
    vec3 normal = normalize(v_normal);
    vec3 view_dir = normalize(u_camera_pos - v_world_position);

    // Faint green ambient with a sky/ground split standing in for reflections
    vec3 ambient = vec3(0.0, 0.102, 0.059) * 0.05;
    vec3 env = mix(vec3(0.08, 0.07, 0.06), vec3(0.35, 0.35, 0.38), normal.y * 0.5 + 0.5);

    // Warm key light from above-right
    vec3 key_dir = normalize(vec3(10.0, 20.0, 10.0));
    float key = max(dot(normal, key_dir), 0.0);
    vec3 key_half = normalize(key_dir + view_dir);
    float key_spec = pow(max(dot(normal, key_half), 0.0), u_shininess);
    vec3 key_color = vec3(1.0, 0.961, 0.902);

    vec3 color = ambient + v_color * env * 0.6;
    color += (v_color * key + key_color * key_spec * u_specular_strength) * key_color;

    // Ruby and gold rim lights behind the tree
    color += point_light(normal, view_dir, vec3(-10.0, 5.0, -10.0), vec3(0.545, 0.0, 0.0), 0.8);
    color += point_light(normal, view_dir, vec3(10.0, 5.0, -10.0), vec3(1.0, 0.843, 0.0), 0.8);

    // Light cast by the star
    color += point_light(normal, view_dir, u_star_light_pos, vec3(1.0, 0.843, 0.0), u_star_light_intensity * 0.3);

    // Tone mapping
    color = color / (color + vec3(1.0));

    // Emissive is added after tone mapping so lights stay hot
    color += v_color * u_emissive_intensity;

    // Gamma correction
    color = pow(color, vec3(1.0 / 2.2));

    fragColor = vec4(color, 1.0);
}
"#;

/// Vertex shader for the foliage point cloud
///
/// Mirrors `foliage::kernel::evaluate_vertex`; keep the two in sync.
pub const FOLIAGE_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_scatter_pos;
layout(location = 1) in vec3 a_tree_pos;
layout(location = 2) in float a_random;

uniform mat4 u_model;
uniform mat4 u_view;
uniform mat4 u_projection;
uniform float u_time;
uniform float u_morph;
uniform vec3 u_pointer;
uniform float u_interaction_radius;
uniform float u_push_distance;

out float v_alpha;
out float v_random;

float cubic_in_out(float t) {
    return t < 0.5
        ? 4.0 * t * t * t
        : 1.0 - pow(-2.0 * t + 2.0, 3.0) / 2.0;
}

void main() {
    v_random = a_random;
    float ease_morph = cubic_in_out(u_morph);

    vec3 pos = mix(a_scatter_pos, a_tree_pos, ease_morph);

    // Push away from the pointer
    float dist = distance(pos, u_pointer);
    float strength = 1.0 - smoothstep(0.0, u_interaction_radius, dist);
    if (strength > 0.0) {
        vec3 push_dir = normalize(pos - u_pointer);
        pos += push_dir * strength * u_push_distance;
    }

    // Wind, damped once the tree is formed
    float breath = sin(u_time * 2.0 + pos.y * 0.5 + a_random * 5.0) * 0.1;
    pos.x += breath * (1.0 - ease_morph * 0.8);
    pos.z += breath * (1.0 - ease_morph * 0.8);

    vec4 view_pos = u_view * u_model * vec4(pos, 1.0);
    gl_Position = u_projection * view_pos;

    float size = (3.0 * a_random + 1.0) + strength * 12.0;
    gl_PointSize = size * (30.0 / -view_pos.z);

    v_alpha = 0.8 + 0.2 * sin(u_time * 3.0 + a_random * 10.0) + strength * 2.0;
}
"#;

/// Fragment shader for the foliage point cloud
pub const FOLIAGE_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in float v_alpha;
in float v_random;

uniform vec3 u_color_base;
uniform vec3 u_color_tip;
uniform float u_time;

out vec4 fragColor;

void main() {
    vec2 coord = gl_PointCoord - vec2(0.5);
    float dist = length(coord) * 2.0;

    // Hard cutoff, no soft fringe
    if (dist > 0.8) {
        discard;
    }

    float sparkle = 0.5 + 0.5 * sin(u_time * 4.0 + v_random * 100.0);
    sparkle = pow(sparkle, 3.0);

    // Base at the centre, tip colour toward the edge
    float edge = smoothstep(0.4, 0.8, dist);
    vec3 tip = u_color_tip * (1.0 + sparkle * 1.2);
    vec3 color = mix(u_color_base, tip, edge);

    color += vec3(0.1) * (1.0 - dist);

    fragColor = vec4(color, v_alpha);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [&str; 5] = [
        ORNAMENT_VERTEX_SHADER,
        STAR_VERTEX_SHADER,
        LIT_FRAGMENT_SHADER,
        FOLIAGE_VERTEX_SHADER,
        FOLIAGE_FRAGMENT_SHADER,
    ];

    #[test]
    fn test_shader_version() {
        for src in ALL {
            assert!(src.starts_with("#version 300 es"));
        }
    }

    #[test]
    fn test_varyings_match() {
        for name in ["v_world_position", "v_normal", "v_color"] {
            assert!(ORNAMENT_VERTEX_SHADER.contains(&format!("out vec3 {}", name)));
            assert!(STAR_VERTEX_SHADER.contains(&format!("out vec3 {}", name)));
            assert!(LIT_FRAGMENT_SHADER.contains(&format!("in vec3 {}", name)));
        }
        for name in ["v_alpha", "v_random"] {
            assert!(FOLIAGE_VERTEX_SHADER.contains(&format!("out float {}", name)));
            assert!(FOLIAGE_FRAGMENT_SHADER.contains(&format!("in float {}", name)));
        }
    }

    #[test]
    fn test_foliage_kernel_constants() {
        assert!(FOLIAGE_VERTEX_SHADER.contains("(3.0 * a_random + 1.0) + strength * 12.0"));
        assert!(FOLIAGE_VERTEX_SHADER.contains("30.0 / -view_pos.z"));
        assert!(FOLIAGE_FRAGMENT_SHADER.contains("dist > 0.8"));
        assert!(FOLIAGE_FRAGMENT_SHADER.contains("smoothstep(0.4, 0.8, dist)"));
    }

    #[test]
    fn test_instance_matrix_location() {
        assert!(ORNAMENT_VERTEX_SHADER.contains("layout(location = 3) in mat4 a_instance_matrix"));
    }
}
