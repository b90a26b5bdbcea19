//! Test fixtures - Java sources and config snippets.

/// Static native entry point taking a string
pub const NATIVE_BRIDGE: &str = r#"package net.swofty.nativebridge;

public final class NativeBridge {
    private NativeBridge() {
    } // no instances

    public static native void printFromNative(String message);

    // Helper method to check if the native library is loaded
    public static boolean isNativeLibraryLoaded() {
        try {
            printFromNative("");
            return true;
        } catch (UnsatisfiedLinkError e) {
            return false;
        }
    }
}
"#;

/// Two natives, one returning an array of a same-package type
pub const NATIVE_PARSER: &str = r#"package net.swofty.nativebridge;

import net.swofty.nativebridge.representation.Command;

public class NativeParser {
    static {
        LibraryLoader.load();
    }

    public static native String parseSwoftLang(String code);

    /**
     * Parses source into commands.
     */
    public static native Command[] parseSwoftLangToCommands(String code);
}
"#;

/// A class without natives
pub const PLAIN_CLASS: &str = r#"package net.swofty;

public class LibraryLoader {
    public static void load() {
        System.loadLibrary("SwoftLang");
    }
}
"#;

/// Instance natives with overloads and an underscore in the name
pub const OVERLOADED: &str = r#"package net.swofty.nativebridge;

public class Buffers {
    public native int read_all(byte[] into);
    public native int read_all(byte[] into, int offset, long length);
    public native double[][] matrix();
}
"#;

/// Config for a Linux build driven by shell commands.
///
/// Configure fails unless the bridge header already exists; build drops a
/// library at the conventional path.
pub const SHELL_BUILD_CONFIG: &str = r#"[scan]
package_prefix = "net.swofty"

[native]
platform = "linux"
configure = ["sh", "-c", "test -f \"$BRIDGEWRIGHT_HEADER_DIR/net_swofty_nativebridge_NativeBridge.h\""]
build = ["sh", "-c", "mkdir -p build/Debug && printf 'built' > build/Debug/libSwoftLang.so"]
"#;

/// Config whose configure step always fails
pub const FAILING_CONFIGURE_CONFIG: &str = r#"[scan]
package_prefix = "net.swofty"

[native]
platform = "linux"
configure = ["sh", "-c", "echo 'CMake Error: no CMakeLists.txt' >&2; exit 1"]
build = ["sh", "-c", "echo unreachable > build.marker"]
"#;

/// Config that only scans (native commands are never reached)
pub const HEADERS_ONLY_CONFIG: &str = r#"[scan]
package_prefix = "net.swofty"
"#;
