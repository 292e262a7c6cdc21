//! Endpoint prefixes for each mirror.

use super::Mirror;

/// Prefixes substituted for GitHub URL prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MirrorEndpoints {
    /// Replaces `https://github.com/` for release asset downloads.
    pub download: &'static str,
    /// Replaces `https://raw.githubusercontent.com/`.
    pub raw: &'static str,
    /// Replaces `https://github.com/` for everything else.
    pub repo: &'static str,
}

const GHPROXY: &str = "https://mirror.ghproxy.com/https://github.com/";

pub(super) fn endpoints_for(mirror: Mirror) -> MirrorEndpoints {
    match mirror {
        Mirror::Fastgit => MirrorEndpoints {
            download: "https://download.fastgit.org/",
            raw: "https://raw.fastgit.org/",
            repo: "https://hub.fastgit.org/",
        },
        Mirror::Mtr => MirrorEndpoints {
            download: "https://download.fastgit.org/",
            raw: "https://raw-gh.gcdn.mirr.one/",
            repo: "https://api.mtr.pub/",
        },
        Mirror::Ghproxy => MirrorEndpoints {
            download: GHPROXY,
            raw: GHPROXY,
            repo: GHPROXY,
        },
        Mirror::Gitclone => MirrorEndpoints {
            download: "https://download.fastgit.org/",
            raw: "https://raw.fastgit.org/",
            repo: "https://gitclone.com/github.com/",
        },
        Mirror::Mirr => MirrorEndpoints {
            download: "https://gh.gcdn.mirr.one/",
            raw: "https://raw-gh.gcdn.mirr.one/",
            repo: "https://gh.gcdn.mirr.one/",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_prefix_is_an_absolute_https_url_ending_in_slash() {
        for mirror in Mirror::ALL {
            let e = endpoints_for(mirror);
            for prefix in [e.download, e.raw, e.repo] {
                assert!(prefix.starts_with("https://"), "{mirror}: {prefix}");
                assert!(prefix.ends_with('/'), "{mirror}: {prefix}");
                assert!(url::Url::parse(prefix).is_ok(), "{mirror}: {prefix}");
            }
        }
    }
}
