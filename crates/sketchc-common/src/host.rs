//! The host runtime surface.
//!
//! Generated code never defines drawing, math or Java-compatibility helpers
//! itself; it reaches them through a single host object. Identifiers that are
//! not declared by the sketch but are provided by the host are qualified as
//! `$p.name` when they are resolved at the outermost scope.

use rustc_hash::FxHashSet;

/// Identifier of the host runtime object in generated code.
pub const HOST_HANDLE: &str = "$p";

/// Sketch API functions and variables exposed by the host.
const API_MEMBERS: &[&str] = &[
    "abs", "acos", "alpha", "ambient", "ambientLight", "append", "applyMatrix", "arc",
    "arrayCopy", "asin", "atan", "atan2", "background", "beginCamera", "beginDraw",
    "beginShape", "bezier", "bezierDetail", "bezierPoint", "bezierTangent", "bezierVertex",
    "binary", "blend", "blendColor", "blue", "box", "breakShape", "brightness", "camera",
    "ceil", "color", "colorMode", "concat", "constrain", "copy", "cos", "createFont",
    "createGraphics", "createImage", "cursor", "curve", "curveDetail", "curvePoint",
    "curveTangent", "curveTightness", "curveVertex", "day", "degrees", "directionalLight",
    "disableContextMenu", "dist", "draw", "ellipse", "ellipseMode", "emissive",
    "enableContextMenu", "endCamera", "endDraw", "endShape", "exit", "exp", "expand",
    "externals", "fill", "filter", "floor", "focused", "frameCount", "frameRate", "frustum",
    "get", "green", "height", "hex", "hint", "hour", "hue", "image", "imageMode", "join",
    "key", "keyCode", "keyPressed", "keyReleased", "keyTyped", "lerp", "lerpColor",
    "lightFalloff", "lights", "lightSpecular", "line", "link", "loadBytes", "loadFont",
    "loadGlyphs", "loadImage", "loadPixels", "loadShape", "loadStrings", "loadXML", "log",
    "loop", "mag", "map", "match", "matchAll", "max", "millis", "min", "minute", "modelX",
    "modelY", "modelZ", "month", "mouseButton", "mouseClicked", "mouseDragged", "mouseMoved",
    "mouseOut", "mouseOver", "mousePressed", "mouseReleased", "mouseScroll", "mouseScrolled",
    "mouseX", "mouseY", "name", "nf", "nfc", "nfp", "nfs", "noCursor", "noFill", "noise",
    "noiseDetail", "noiseSeed", "noLights", "noLoop", "norm", "normal", "noSmooth",
    "noStroke", "noTint", "ortho", "param", "parseBoolean", "parseByte", "parseChar",
    "parseFloat", "parseInt", "perspective", "pixels", "pmouseX", "pmouseY", "point",
    "pointLight", "popMatrix", "popStyle", "pow", "print", "printCamera", "println",
    "printMatrix", "printProjection", "pushMatrix", "pushStyle", "quad", "radians",
    "random", "randomSeed", "rect", "rectMode", "red", "redraw", "requestImage",
    "resetMatrix", "reverse", "rotate", "rotateX", "rotateY", "rotateZ", "round",
    "saturation", "save", "saveFrame", "saveStrings", "scale", "screenX", "screenY",
    "screenZ", "second", "set", "setup", "shape", "shapeMode", "shearX", "shearY",
    "shininess", "shorten", "sin", "size", "smooth", "sort", "specular", "sphere",
    "sphereDetail", "splice", "split", "splitTokens", "spotLight", "sq", "sqrt", "status",
    "str", "stroke", "strokeCap", "strokeJoin", "strokeWeight", "subset", "tan", "text",
    "textAlign", "textAscent", "textDescent", "textFont", "textLeading", "textMode",
    "textSize", "texture", "textureMode", "textWidth", "tint", "touchCancel", "touchEnd",
    "touchMove", "touchStart", "transform", "translate", "triangle", "trim", "unbinary",
    "unhex", "updatePixels", "use3DContext", "vertex", "width", "year",
];

/// Proxy functions targeted by the expression pre-transform.
const PROXY_MEMBERS: &[&str] = &[
    "__contains", "__equals", "__equalsIgnoreCase", "__frameRate", "__hashCode",
    "__int_cast", "__instanceof", "__keyPressed", "__mousePressed", "__printStackTrace",
    "__replace", "__replaceAll", "__replaceFirst", "__toCharArray", "__split",
    "__codePointAt", "__startsWith", "__endsWith", "__matches",
];

/// Constants exposed by the host.
const CONSTANTS: &[&str] = &[
    "P2D", "JAVA2D", "WEBGL", "P3D", "OPENGL", "PDF", "DXF", "EPSILON", "MAX_FLOAT",
    "MIN_FLOAT", "MAX_INT", "MIN_INT", "PI", "TWO_PI", "HALF_PI", "THIRD_PI", "QUARTER_PI",
    "TAU", "DEG_TO_RAD", "RAD_TO_DEG", "WHITESPACE", "RGB", "ARGB", "HSB", "ALPHA", "CMYK",
    "BLUR", "GRAY", "INVERT", "OPAQUE", "POSTERIZE", "THRESHOLD", "ERODE", "DILATE",
    "REPLACE", "BLEND", "ADD", "SUBTRACT", "LIGHTEST", "DARKEST", "DIFFERENCE", "EXCLUSION",
    "MULTIPLY", "SCREEN", "OVERLAY", "HARD_LIGHT", "SOFT_LIGHT", "DODGE", "BURN",
    "CUSTOM", "ORTHOGRAPHIC", "PERSPECTIVE", "POINT", "POINTS", "LINE", "LINES",
    "TRIANGLE", "TRIANGLES", "TRIANGLE_STRIP", "TRIANGLE_FAN", "QUAD", "QUADS",
    "QUAD_STRIP", "POLYGON", "PATH", "RECT", "ELLIPSE", "ARC", "SPHERE", "BOX", "GROUP",
    "PRIMITIVE", "GEOMETRY", "VERTEX", "BEZIER_VERTEX", "CURVE_VERTEX", "BREAK",
    "CLOSESHAPE", "OPEN", "CLOSE", "CORNER", "CORNERS", "RADIUS", "CENTER_RADIUS",
    "CENTER", "DIAMETER", "CENTER_DIAMETER", "BASELINE", "TOP", "BOTTOM", "NORMAL",
    "NORMALIZED", "IMAGE", "MODEL", "SHAPE", "SQUARE", "ROUND", "PROJECT", "MITER",
    "BEVEL", "AMBIENT", "DIRECTIONAL", "SPOT", "BACKSPACE", "TAB", "ENTER", "RETURN",
    "ESC", "DELETE", "CODED", "SHIFT", "CONTROL", "ALT", "CAPSLK", "PGUP", "PGDN", "END",
    "HOME", "LEFT", "UP", "RIGHT", "DOWN", "F1", "F2", "F3", "F4", "F5", "F6", "F7", "F8",
    "F9", "F10", "F11", "F12", "NUMLK", "META", "INSERT", "ARROW", "CROSS", "HAND", "MOVE",
    "TEXT", "WAIT", "NOCURSOR",
];

/// Classes the host provides in the default scope.
const DEFAULT_SCOPE: &[&str] = &[
    "ArrayList", "HashMap", "PVector", "ObjectIterator", "PConstants", "PFont", "PImage",
    "PShape", "PShapeSVG", "PMatrix2D", "PMatrix3D", "PMatrixStack", "XMLElement", "XML",
    "Character", "Random",
];

/// Set of names qualified with the host handle at the outermost scope.
#[derive(Clone, Debug)]
pub struct HostMembers {
    names: FxHashSet<String>,
}

impl HostMembers {
    /// The built-in host surface.
    pub fn standard() -> Self {
        let names = API_MEMBERS
            .iter()
            .chain(PROXY_MEMBERS)
            .chain(CONSTANTS)
            .chain(DEFAULT_SCOPE)
            .map(|name| (*name).to_string())
            .collect();
        Self { names }
    }

    /// The built-in surface plus names a particular host adds.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut members = Self::standard();
        members.names.extend(extra.into_iter().map(Into::into));
        members
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for HostMembers {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
#[path = "../tests/host.rs"]
mod tests;
