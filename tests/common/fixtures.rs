//! Test fixtures - package configs and fake tools.

#![allow(dead_code)]

/// ARB built in place.
pub const ARB_CONFIG: &str = r#"
name = "ARB"
version = "5.5"
start_dir = "arbsrc"
"#;

/// IPP before the 8.0 installer change.
pub const IPP_7_CONFIG: &str = r#"
name = "ipp"
version = "7.0"
start_dir = "l_ipp_7.0"
"#;

/// IPP 2016 (9.0 update 1).
pub const IPP_9_1_CONFIG: &str = r#"
name = "ipp"
version = "9.1"
start_dir = "l_ipp_9.1"
installopts = "--cli-mode"
"#;

/// Fake `make`: bare `make` fails, any other call creates the ARB tree and
/// records its arguments and search paths.
pub const FAKE_MAKE: &str = r#"
echo "$*" >> make.log
if [ $# -eq 0 ]; then
    exit 2
fi
echo "$PATH" > path.log
echo "$LD_LIBRARY_PATH" > ld_library_path.log
echo "$ARBHOME" > arbhome.log
mkdir -p bin lib
touch bin/arb
"#;

/// Fake Intel installer: copies the silent config next to itself and creates
/// every path listed in `layout.txt` under `PSET_INSTALL_DIR`.
pub const FAKE_INSTALLER: &str = r#"
if [ "$1" != "-s" ]; then
    echo "usage: install.sh -s <silent.cfg>" >&2
    exit 1
fi
cp "$2" ./used-silent.cfg
echo "$*" > args.log
dest=$(sed -n 's/^PSET_INSTALL_DIR=//p' "$2")
while read kind path; do
    [ -z "$path" ] && continue
    if [ "$kind" = "d" ]; then
        mkdir -p "$dest/$path"
    else
        mkdir -p "$(dirname "$dest/$path")"
        touch "$dest/$path"
    fi
done < layout.txt
"#;
