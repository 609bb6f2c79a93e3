//! News article data and content.

/// News article structure
#[derive(Clone, Debug)]
pub struct Article {
    pub slug: &'static str,
    pub title: &'static str,
    pub date: &'static str,
    pub summary: &'static str,
    pub content: &'static str,
    pub tags: &'static [&'static str],
    pub author: &'static str,
}

/// Format a tag for display (e.g., "formal-logic" -> "Formal Logic")
pub fn format_tag(tag: &str) -> String {
    tag.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Get all articles sorted by date (newest first)
pub fn get_articles() -> Vec<&'static Article> {
    let mut articles: Vec<&'static Article> = ARTICLES.iter().collect();
    articles.sort_by(|a, b| b.date.cmp(a.date));
    articles
}

/// Get a single article by slug
pub fn get_article_by_slug(slug: &str) -> Option<&'static Article> {
    ARTICLES.iter().find(|a| a.slug == slug)
}

/// Get all unique tags from articles
pub fn get_all_tags() -> Vec<&'static str> {
    let mut tags: Vec<&'static str> = ARTICLES
        .iter()
        .flat_map(|a| a.tags.iter().copied())
        .collect();
    tags.sort();
    tags.dedup();
    tags
}

/// Get articles filtered by tag
pub fn get_articles_by_tag(tag: &str) -> Vec<&'static Article> {
    let mut articles: Vec<&'static Article> = ARTICLES
        .iter()
        .filter(|a| a.tags.contains(&tag))
        .collect();
    articles.sort_by(|a, b| b.date.cmp(a.date));
    articles
}

/// All news articles
static ARTICLES: &[Article] = &[
    Article {
        slug: "release-0-8-14-bedrock",
        title: "v0.8.14 — Bedrock and Maybe",
        date: "2026-02-15",
        summary: "Deep expression folding across all 26 AST variants, unreachable-after-return elimination, algebraic identity simplification for integers and floats, and Maybe as dual syntax for Option.",
        content: r#"
## Deep Expression Recursion

The constant folder previously handled top-level binary expressions but left sub-expressions inside function calls, list literals, struct constructors, index expressions, `Option`/`Maybe` `Some` wrappers, `Contains` checks, and closures untouched. A catch-all `_ => expr` arm silently passed through 20+ `Expr` variants without recursing.

v0.8.14 replaces the catch-all with exhaustive matching across all 26 variants. Every sub-expression site — `Call` args, `List` elements, `New` field initializers, `Index` expressions, `OptionSome` values, `Closure` bodies — now gets folded. Given:

```
## To double (n: Int) -> Int:
    Return n * 2.

## Main
Show double(2 + 3).
```

The `2 + 3` inside the call arguments folds to `5` before codegen, producing `double(5)` instead of `double(2 + 3)`.

## Unreachable-After-Return DCE

Statements following a `Return` in the same block are dead code. The dead code elimination pass now truncates blocks after the first `Return`:

```
## To f () -> Int:
    Return 42.
    Show "unreachable".
    Return 99.
```

The `Show` and second `Return` are eliminated. This also catches returns inlined from constant-folded `if true` branches. Returns inside nested `If` blocks do not incorrectly truncate the outer block.

## Algebraic Simplification

A new `try_simplify_algebraic` pass fires when one operand of a binary expression is a known identity or annihilator:

| Pattern | Result |
|---------|--------|
| `x + 0`, `0 + x` | `x` |
| `x * 1`, `1 * x` | `x` |
| `x * 0`, `0 * x` | `0` |
| `x - 0` | `x` |
| `x / 1` | `x` |

These rules apply to both integers and floats. The simplification returns the surviving operand directly — no arena allocation needed. Combined with deep expression recursion, `double(5 + 0)` first recurses into the call argument, then simplifies `5 + 0` to `5`, producing `double(5)`.

## Maybe Syntax

`Maybe` is now a first-class alias for `Option`. Both forms work interchangeably:

```
Let x: Option of Int be nothing.
Let y: Maybe of Int be nothing.
Let z: Maybe Int be nothing.
```

The direct form — `Maybe Int` without the `of` preposition — follows Haskell convention. It works in all positions: variable annotations, function return types, and nested generics (`Maybe List of Int` → `Option<Vec<i64>>`). All seven codegen paths that handle `Option` now accept `Maybe` identically.
"#,
        tags: &["release", "performance", "compiler"],
        author: "LOGICAFFEINE Team",
    },
    Article {
        slug: "release-0-8-13-optimizer",
        title: "v0.8.10–0.8.13 — The Optimizer",
        date: "2026-02-14",
        summary: "Accumulator introduction, automatic memoization, mutual tail call optimization, purity analysis, peephole patterns, and copy-type elision — recursive functions now compile to loops, and generated code approaches hand-written Rust.",
        content: r#"
## Accumulator Introduction

The centerpiece of this release cluster is **accumulator introduction**. The optimizer detects recursive patterns like `f(n-1) + k` (additive) and `n * f(n-1)` (multiplicative) and rewrites them into zero-overhead loops. Given this LOGOS source:

```
## To factorial (n: Int) -> Int:
    If n is at most 1:
        Return 1.
    Return n * factorial(n - 1).
```

The codegen emits:

```rust
fn factorial(mut n: i64) -> i64 {
    let mut __acc: i64 = 1;
    loop {
        if n <= 1 {
            return __acc * 1;
        }
        {
            let __acc_expr = n;
            __acc = __acc * __acc_expr;
            let __tce_0 = n - 1;
            n = __tce_0;
            continue;
        }
    }
}
```

The identity element (`1` for multiplication, `0` for addition) initializes the accumulator. Each recursive return becomes an accumulator update and a `continue`. Stack frames are eliminated entirely.

## Mutual TCO and Memoization

**Mutual tail call optimization** handles function pairs like `isEven`/`isOdd` that call each other in tail position. The optimizer merges them into a single `__mutual_isEven_isOdd` function with a `__tag: u8` parameter and a `loop { match __tag { 0 => { ... }, 1 => { ... } } }` dispatch. The original functions become `#[inline]` wrappers that call the merged function with the appropriate tag.

**Automatic memoization** targets pure functions with multiple recursive calls. A fixed-point **purity analysis** identifies side-effect-free functions (no `Show`, file I/O, CRDT operations, etc.). Pure multi-branch functions like Fibonacci receive a `thread_local!` `RefCell<HashMap>` cache — the function checks the cache before executing, stores results after, and drops complexity from O(2^n) to O(n) with zero source changes.

## Peephole Patterns and Build Profile

Lower-level optimizations target generated Rust quality:

- **Vec fill**: a push loop with constant value becomes `vec![val; count]`
- **Swap pattern**: adjacent-index comparisons with temp-variable swaps become `arr.swap(i, j)`
- **Copy-type elision**: `.clone()` on `Vec`/`HashMap` indexing dropped for `Copy` types (`i64`, `f64`, `bool`)
- **Direct collection indexing**: known `Vec`/`HashMap` types use direct indexing instead of trait dispatch
- **HashMap equality**: `map.get()` replaces `map[key].clone()` in comparisons

Release builds use `opt-level = 3`, `codegen-units = 1`, `panic = "abort"`, `strip = true`, and LTO. Hot paths carry `#[inline]`; all `Showable`, `LogosContains`, and `LogosIndex` trait impls use `#[inline(always)]`.
"#,
        tags: &["release", "performance", "compiler"],
        author: "LOGICAFFEINE Team",
    },
    Article {
        slug: "release-0-8-6-benchmarks",
        title: "v0.8.6 — Ten-Language Benchmark Suite",
        date: "2026-02-13",
        summary: "A benchmark suite comparing LOGOS against C, C++, Rust, Go, Zig, Nim, Python, Ruby, JavaScript, and Java — with CI automation and an interactive results page.",
        content: r#"
## Why Benchmark

Performance claims without numbers are marketing. We implemented 6 benchmark programs in 10 languages and LOGOS, measured wall-clock time with `hyperfine` (3 warmup runs, 10 measured runs), and published the results on every release.

## The Programs

Six programs exercise different computational patterns:

- **fib** — naive recursive Fibonacci (function call overhead)
- **sieve** — Sieve of Eratosthenes (array mutation, tight loops)
- **collect** — hash map insert/lookup (allocation pressure)
- **strings** — string concatenation (allocator throughput)
- **bubble_sort** — O(n²) sort (nested loops, array mutation, swaps)
- **ackermann** — Ackermann function (extreme recursion depth, stack frame overhead)

Each program is implemented idiomatically in C, C++, Rust, Go, Zig, Nim, Python, Ruby, JavaScript, and Java. No artificial handicaps or advantages.

## CI Integration

A GitHub Actions workflow runs the full benchmark suite on every tagged release. The runner compiles all implementations, verifies correctness against expected output files, benchmarks runtime with `hyperfine`, measures compilation time separately, and assembles the results into `benchmarks/results/latest.json`. Results are committed back to the repository, and the frontend deploy triggers after benchmarks land.

Versioned results are archived in `benchmarks/results/history/`, so performance trends are recoverable across releases.

## The Results Page

The `/benchmarks` page embeds `latest.json` at compile time. Each benchmark tab shows grouped bar charts split by language tier (systems, managed, transpiled, interpreted), with LOGOS highlighted. Collapsible sections show full statistics (mean, median, stddev, min, max, coefficient of variation), source code for all implementations side-by-side, and compilation time comparisons.

A cross-benchmark summary computes geometric mean speedup versus C across all 6 programs, providing a single aggregate performance number.

## What It Measures

The benchmark suite tests the full compilation path: LOGOS source → parser → codegen → Rust output → `rustc` → binary. Interpreter mode runs separately at smaller input sizes. This means the numbers reflect codegen quality — the optimizer's job — and `rustc` optimization of the generated code. When LOGOS gets faster, it's because the generated Rust got better.
"#,
        tags: &["release", "performance", "benchmarks"],
        author: "LOGICAFFEINE Team",
    },
    Article {
        slug: "release-0-8-2-interpreter-optimizer",
        title: "v0.8.2 — Interpreter Mode and Optimizer Infrastructure",
        date: "2026-02-12",
        summary: "An interpreter for sub-second feedback during development, the first optimizer passes (constant folding, dead code elimination), and map insertion syntax.",
        content: r#"
## Interpreter Mode

Before v0.8.2, every code change required a full compilation cycle: LOGOS source → Rust codegen → `cargo build` → run binary. For large projects, that's minutes of waiting per iteration.

`largo run --interpret` bypasses codegen entirely. The interpreter walks the AST directly, evaluating expressions and executing statements without generating Rust. Startup is sub-second.

The interpreter supports the full language surface: variables, functions, control flow, collections, structs, enums, pattern matching, string operations, and arithmetic. It handles 1-based indexing, type coercion, and the standard library. The goal is behavioral equivalence with compiled output — if it works in the interpreter, it works when compiled.

Interpreter mode is for development. It doesn't optimize, doesn't type-check at the Rust level, and runs slower than compiled code by orders of magnitude. But it turns the edit-run cycle from minutes to milliseconds.

## Optimizer Infrastructure

This release lays the foundation for all subsequent optimization work (v0.8.10–0.8.13). Two passes ship in v0.8.2:

**Constant folding** evaluates compile-time-known expressions during codegen. `3 + 4` becomes `7` in the generated Rust, not a runtime addition. This propagates through variable assignments when the optimizer can prove the value is constant.

**Dead code elimination** removes unreachable branches. An `if false { ... }` block (after constant folding resolves the condition) is dropped entirely from the output. This keeps generated code clean and reduces what `rustc` has to process.

Both passes operate on the AST before Rust emission — they improve codegen quality without changing language semantics.

## Map Insertion Syntax

A new syntax form for map mutations:

```
Set scores at "alice" to 95.
```

This generates `scores.insert("alice".to_string(), 95)` in Rust. Previously, map insertion required method-call syntax that didn't match the natural-language feel of the rest of the language.

## FFI Safety Hardening

The C export system introduced in v0.8.0 received safety improvements: thread-local error caching (so FFI errors don't cross thread boundaries), panic boundaries at every exported function (so a LOGOS panic doesn't unwind into C), null handle validation, and a dynamic `logos_version()` function for ABI compatibility checking.

`LogosHandle` changed from `*const c_void` to `*mut c_void` to correctly represent mutable state. Text/String types are excluded from the C ABI value types — they require explicit conversion through the string API.
"#,
        tags: &["release", "feature", "performance"],
        author: "LOGICAFFEINE Team",
    },
    Article {
        slug: "release-0-8-0-lsp-ffi",
        title: "v0.8.0 — LSP Server and FFI System",
        date: "2026-02-10",
        summary: "A Language Server Protocol implementation with full language intelligence, a VSCode extension for 5 platforms, and a C FFI export system for cross-language interop.",
        content: r#"
## Language Server

LOGOS ships an LSP server with 14 features across four categories. The server runs as `largo lsp` over stdio, maintaining per-document state with full re-analysis on every keystroke.

**Code intelligence**: diagnostics (real-time parse and analysis errors), hover (type info, verb class, tense, aspect), and semantic tokens (keyword, variable, function, struct, string, number classifications with delta encoding).

**Navigation**: go to definition, find references, document symbols (outline view), and code lens (inline reference counts above definitions).

**Refactoring**: rename (with prepare-rename validation) and code actions (extract to function, dead code elimination).

**Editing**: completions (triggered on `.`, `:`, `'`), signature help (triggered on `with`, `,`), inlay hints (inferred types, parameter names), folding ranges, and formatting.

Token resolution handles the full range of name-bearing token types: `Identifier`, `ProperName`, `Noun`, `Adjective`, and `Verb`. A variable named `x` might be lexed as `Adjective(Symbol)` rather than `Identifier` — the server resolves this uniformly through a centralized `resolve_token_name()` function.

## VSCode Extension

The extension bundles pre-compiled LSP binaries for 5 platform targets: `x86_64-unknown-linux-gnu`, `aarch64-unknown-linux-gnu`, `x86_64-apple-darwin`, `aarch64-apple-darwin`, and `x86_64-pc-windows-msvc`. Installation is zero-configuration. TextMate grammars handle syntax highlighting; semantic token overrides from the LSP provide meaning-aware coloring.

## FFI / C Export System

Functions marked `is exported` get C-linkage wrappers for consumption by C, C++, Python (via ctypes/cffi), and any language with a C FFI:

```
## To add (a: Int) and (b: Int) -> Int is exported:
    Return a + b.
```

The codegen emits `#[export_name = "logos_add"] pub extern "C" fn` with `std::panic::catch_unwind` boundaries. Integer and float parameters pass directly; text parameters marshal through `*const c_char` input / `*mut *mut c_char` output with null-pointer validation. A `LogosStatus` enum (`Ok`, `NullPointer`, `ThreadPanic`, etc.) communicates errors. Collections and structs cross the boundary as opaque `LogosHandle` pointers with typed accessor functions (`logos_seq_i64_push`, `logos_person_age`, etc.).

## CI/CD

Three GitHub Actions workflows ship with v0.8.0:

- **Release**: builds platform binaries and the VSCode extension `.vsix` on tag push
- **Publish**: publishes all workspace crates to crates.io in dependency order
- **Deploy**: builds the WASM frontend and deploys to production

The publish workflow handles the lockstep versioning scheme — all 11 crates share a single version number and publish atomically.
"#,
        tags: &["release", "tools", "feature"],
        author: "LOGICAFFEINE Team",
    },
    Article {
        slug: "stablecoins-treasury-future-of-money",
        title: "Stablecoins, Treasury Bills, and the Future of American Money",
        date: "2026-02-02",
        summary: "The GENIUS Act became law in 2025, and the CLARITY Act is advancing through Congress. From Ripple's RLUSD to USDC on Solana, Treasury-backed stablecoins are becoming infrastructure for the digital dollar.",
        content: r#"
## The 40,000-Foot View: A New Monetary Architecture

The [GENIUS Act](https://www.congress.gov/bill/119th-congress/senate-bill/1582) became law in July 2025, establishing the first federal framework for stablecoins. The [CLARITY Act](https://www.congress.gov/bill/119th-congress/house-bill/3633), which would establish broader digital asset market structure, passed the House and awaits Senate action. Combined with executive orders establishing a Strategic Bitcoin Reserve and prohibiting a government CBDC, the architecture of American digital money is taking shape.

The policy direction is clear: private stablecoins backed by Treasury debt, running on regulated blockchain infrastructure, with defined jurisdictional boundaries between agencies. The government provides the backing; the private sector provides the innovation.

### The GENIUS Act: Stablecoin Law

President Trump signed the GENIUS Act (Guiding and Establishing National Innovation for U.S. Stablecoins) into law on July 18, 2025, after bipartisan passage — 68-30 in the Senate, 308-122 in the House.

The reserve requirements channel capital directly into US government debt:

- **100% reserve backing** required with liquid assets
- Permitted reserves: US dollars, short-term Treasury bills (93 days or less), Treasury-backed reverse repos, government money market funds
- **Monthly public disclosures** of reserve composition mandatory
- Issuers under $10 billion may opt for state regulation if "substantially similar"

Payment stablecoins are explicitly **not securities or commodities** under the Act. Foreign issuers are permitted subject to Treasury Department determination of comparable home-country regulations.

### The CLARITY Act: Pending Market Structure Legislation

The [Digital Asset Market Clarity Act](https://www.congress.gov/bill/119th-congress/house-bill/3633) (H.R. 3633), introduced in May 2025, passed the House on July 17, 2025 with a 294-134 bipartisan vote. As of January 2026, the bill is pending in the Senate Banking Committee, which released a 278-page amended draft on January 12, 2026.

Key provisions in the House-passed version:

- **CFTC would receive "exclusive jurisdiction"** over "digital commodity" spot markets
- **SEC would retain jurisdiction** over investment contract assets
- "Digital commodity" defined as assets whose value is "intrinsically linked" to blockchain use
- **Stablecoins explicitly excluded** from the "digital commodity" definition (covered by GENIUS Act)
- Digital commodity exchanges, brokers, and dealers would register with CFTC
- Contains what authors describe as the "strongest illicit-finance framework Congress has considered for digital assets"

If enacted, GENIUS would handle stablecoins while CLARITY handles market structure. The regulatory fog that plagued the industry since 2017 is beginning to lift.

### The Ripple Precedent: XRP Is Not a Security

The regulatory clarity owes much to [Ripple Labs' five-year legal battle](https://www.ccn.com/education/crypto/ripple-vs-sec-timeline-and-outcomes/) with the SEC.

**July 13, 2023**: Judge Analisa Torres issued a landmark ruling — **XRP is not a security when sold on public exchanges**. Institutional sales ($728 million) were unregistered securities offerings, but secondary market trading was vindicated.

**May 8, 2025**: After five years of litigation, Ripple and the SEC reached a **$50 million settlement** — down from the original $125 million penalty. Executives Brad Garlinghouse and Chris Larsen were fully cleared.

**August 2025**: Both parties withdrew all appeals, officially ending the case.

The precedent matters: distinguishing between institutional token sales and secondary market trading created legal clarity that enabled everything that followed, including multiple spot XRP ETFs approved in November 2025.

### RLUSD: The Gold Standard for Regulated Stablecoins

[Ripple's RLUSD](https://ripple.com/solutions/stablecoin/) launched December 17, 2024 after receiving NYDFS (New York Department of Financial Services) approval — one of the world's strictest regulatory regimes.

**Reserve Structure:**
- 100% backed 1:1 by US dollars
- Reserves held in: US dollar deposits, US government bonds, cash equivalents
- Monthly third-party reserve attestations published publicly
- Issued by Standard Custody & Trust Company under New York trust charter

**Market Position (late 2025):**
- Market cap: $1.26 billion
- Third-largest US-regulated stablecoin
- 80% deployed on Ethereum ($1.01 billion)
- 20% deployed on XRP Ledger ($225 million)

RLUSD demonstrates what GENIUS Act compliance looks like in practice: transparent reserves, regulatory oversight, multi-chain deployment.

### The XRP Ledger: Purpose-Built for Payments

The [XRP Ledger](https://xrpl.org/) operates differently from general-purpose smart contract platforms. Its Federated Byzantine Agreement consensus achieves transaction finality in 3-5 seconds at approximately 1,500 TPS — without mining or staking.

**Native DeFi features built into the protocol:**
- Central Limit Order Book (CLOB) DEX
- Automated Market Maker (AMM) — voted into protocol March 2024
- Permissioned DEX for institutional participants (launched June 2025)
- Clawback feature for compliance (enabled January 2025)

The June 2025 launch of an **XRPL EVM Sidechain** enables Ethereum smart contract compatibility while maintaining the main chain's payment-focused architecture.

Multiple stablecoins now operate on XRPL: Circle's USDC, Braza Group's USDB, Schuman Financial's EUROP, StratsX's XSGD.

### USDC: Multi-Chain Treasury-Backed Liquidity

[Circle's USDC](https://www.circle.com/) — at $60+ billion market cap — represents the transparent, audited model of Treasury-backed stablecoins.

**Reserve Structure:**
- 1:1 backing by cash and short-term US Treasuries in segregated accounts
- Circle Reserve Fund (USDXX): SEC-registered government money market fund
- Monthly attestations by Big Four auditors
- Daily reporting available through BlackRock

**Multi-Chain Deployment:**
- 20+ blockchains: Ethereum, Solana, Base, Optimism, Arbitrum, XRP Ledger
- 35+ million users globally
- Solana USDC transfer volume surpassed Ethereum on December 29, 2025

### Solana: Speed and Scale

[Solana](https://solana.com/) has emerged as a leading stablecoin settlement layer, with $15+ billion in stablecoin market cap — 3x growth from end of 2024.

**Technical advantages:**
- 400-millisecond block time
- Transaction costs: fractions of a cent
- 1,000-4,000 TPS

**Institutional adoption:**
- **Visa**: Using Solana for USDC settlement
- **Stripe**: Added support for Solana-based USDC payments
- **PayPal**: PYUSD launched on Solana May 2024, leveraging Token Extensions for built-in compliance features

PayPal's integration is notable: PYUSD users see a unified balance across PayPal/Venmo wallets regardless of underlying blockchain. The infrastructure becomes invisible to consumers.

### Ethereum: Smart Contract Foundation

[Ethereum](https://ethereum.org/) still hosts over 80% of global stablecoin supply, with smart contracts enabling:

- **DeFi integration**: Lending protocols (Aave, Compound), DEXs (Uniswap), yield farming
- **Automated treasury management**: Smart contracts rebalancing reserves
- **Payroll automation**: Enterprises using smart contracts for compliant global payments
- **MetaMask Stablecoin Earn**: Launched July 2025 for passive yield on stablecoins

DAI — the decentralized, crypto-collateralized stablecoin from MakerDAO — demonstrates an alternative model: algorithmic stability backed by over-collateralized positions in ETH, USDC, and approved tokens, governed by MKR token holders.

### The Strategic Bitcoin Reserve

The stablecoin framework exists alongside the [Strategic Bitcoin Reserve](https://www.whitehouse.gov/fact-sheets/2025/03/fact-sheet-president-donald-j-trump-establishes-the-strategic-bitcoin-reserve-and-u-s-digital-asset-stockpile/) established March 6, 2025.

The government holds an estimated 207,000 Bitcoin (approximately $17 billion at March 2025 prices) from criminal and civil forfeitures. The policy: no selling. A "digital Fort Knox."

A separate Digital Asset Stockpile holds Ether, XRP, Solana, and Cardano from forfeitures. The government is now a holder of the assets it regulates.

### No CBDC — A Deliberate Choice

[Executive Order 14178](https://www.federalreserve.gov/central-bank-digital-currency.htm) (January 2025) prohibits federal agencies from establishing, issuing, or promoting a Central Bank Digital Currency. The House passed the Anti-CBDC Surveillance State Act in July 2025.

While 134 jurisdictions (98% of global GDP) pursue CBDCs, the US chose a different path: let regulated private stablecoins — backed by Treasury debt, running on multiple blockchains — serve the function of digital dollars. The government gets demand for its debt instruments; the private sector innovates.

### Formal Verification: The Missing Layer

When stablecoin smart contracts control billions in Treasury-backed reserves, software correctness becomes a matter of financial system stability.

[Formal verification tools](https://www.certora.com/) like Certora — securing over $100 billion in DeFi total value locked — provide mathematical proof that contract code behaves as specified. The same techniques that verify aerospace software can verify financial infrastructure.

LOGOS contributes to this stack: translating natural language regulatory requirements into [first-order logic](https://plato.stanford.edu/entries/logic-classical/) that can be checked against implementations. When the GENIUS Act says reserves must be "100% backed by liquid assets," that requirement can be formally specified and verified.

### The Architecture Taking Shape

The emerging system:

1. **Treasury-backed stablecoins** (RLUSD, USDC) provide dollar liquidity
2. **Multiple blockchains** (XRP Ledger, Solana, Ethereum) provide settlement infrastructure
3. **Federal law** (GENIUS Act) regulates stablecoins; **pending legislation** (CLARITY Act) would clarify broader market structure
4. **Strategic reserves** (Bitcoin, digital assets) diversify government holdings
5. **Formal verification** ensures contract correctness
6. **No CBDC** — private innovation with public backing

Much of this is already operational. The stablecoins are trading; the reserves are published; the GENIUS Act is law. The CLARITY Act's passage would complete the regulatory picture. Whether this architecture defines digital money for the next decade depends on execution — and on the quality of the software underlying it all.

### Further Reading

- [GENIUS Act](https://www.congress.gov/bill/119th-congress/senate-bill/1582)
- [CLARITY Act](https://www.congress.gov/bill/119th-congress/house-bill/3633)
- [Ripple RLUSD](https://ripple.com/solutions/stablecoin/)
- [Circle USDC Transparency](https://www.circle.com/transparency)
- [XRP Ledger Documentation](https://xrpl.org/)
- [Strategic Bitcoin Reserve](https://www.whitehouse.gov/fact-sheets/2025/03/fact-sheet-president-donald-j-trump-establishes-the-strategic-bitcoin-reserve-and-u-s-digital-asset-stockpile/)
"#,
        tags: &["blockchain", "finance", "regulation", "stablecoins", "xrp"],
        author: "LOGICAFFEINE Team",
    },
    Article {
        slug: "formal-verification-space-satellites",
        title: "Proving Code Correct in Orbit: Formal Verification for Space Systems",
        date: "2026-01-30",
        summary: "NASA's Artemis program, the seL4 verified microkernel, and static analyzers like Astrée demonstrate how mathematical proof techniques protect spacecraft from software failures 250,000 miles from the nearest debugger.",
        content: r#"
## When Reboot Isn't an Option

The Artemis II flight software — approximately 50,000 lines of code controlling human lives on the journey to lunar orbit — was "flown" more than 100,000 simulated times before the actual launch. But simulation alone can't guarantee correctness. For that, NASA increasingly relies on [formal methods](https://shemesh.larc.nasa.gov/nfm2025/): mathematical techniques that prove software properties hold for all possible inputs, not just the ones you thought to test.

### The NASA Formal Methods Program

The [NASA Formal Methods Symposium](https://shemesh.larc.nasa.gov/nfm2025/), now in its 17th year, brings together researchers working on "formal techniques for software and system assurance in space, aviation, and robotics." The 2025 symposium at William & Mary focused on verification challenges for the next generation of space systems.

NASA's formal methods infrastructure includes:

- **NASA-STD-8739.8**: Software Assurance and Safety Standard
- **NASA-STD-8739.9**: Software Formal Inspections Standard
- **Independent Verification and Validation (IV&V)**: Applied to all human spaceflight programs

Projects currently under formal verification scrutiny include the Roman Space Telescope, Europa Clipper, Regenerative Fuel Cell systems, and all Artemis program elements — SLS, Orion, and Gateway.

### The seL4 Verified Microkernel

[seL4](https://sel4.systems/) represents the gold standard in formally verified operating systems. This microkernel — 8,700 lines of C and 600 lines of assembler — comes with a machine-checked proof from abstract specification down to the actual C implementation.

The proof guarantees: no code injection attacks, no buffer overflows, no null pointer dereferences. These aren't claims based on testing; they're mathematical certainties derived from the code itself.

**Space Applications of seL4:**

NASA's core Flight Software (cFS), which runs on the Artemis program and Roman Space Telescope missions, has been ported to seL4. This led to the development of Magnetite, a real-time operating system built on verified foundations.

**Defense Applications:**

DARPA's PROVERS and INSPECTA programs (started 2024) fund continued seL4 development. The CASE project with Collins Aerospace and Galois explores verified software for military aviation systems. [DornerWorks](https://dornerworks.com/) has deployed seL4 for aerospace, defense, medical, and automotive customers since 2015.

### DO-178C and the Formal Methods Supplement

Commercial and military aviation software follows [DO-178C](https://en.wikipedia.org/wiki/DO-178C), released in December 2011 and recognized by the FAA, EASA, and Transport Canada. The standard defines Design Assurance Levels (DAL) A through E based on failure severity, with Level A — "catastrophic failure" — requiring the most rigorous verification.

The formal methods supplement, [DO-333](https://en.wikipedia.org/wiki/DO-178C#Formal_methods_supplement), provides specific guidance for applying theorem proving, model checking, and abstract interpretation to certification. Crucially, formal methods can complement or replace dynamic testing — you can prove properties instead of testing for them.

Additional supplements cover Model-Based Development (DO-331), Object-Oriented Technology (DO-332), and Tool Qualification (DO-330).

### Astrée: Static Analysis at Scale

[Astrée](https://www.absint.com/astree/index.htm) is a commercial static analyzer built on abstract interpretation theory. It doesn't test code; it mathematically analyzes all possible execution paths to prove the absence of runtime errors.

**Aerospace Deployments:**

- **Airbus (since 2003)**: Safety-critical software for the A380 and subsequent aircraft
- **European Space Agency (2008)**: Proved absence of runtime errors in the Jules Verne ATV automatic docking software — the system that autonomously docked supply vessels with the International Space Station

**Other Safety-Critical Industries:**

- **Bosch Automotive Steering (2018)**: Replaced legacy analysis tools, acquired worldwide license
- **Framatome**: TELEPERM XS platform for nuclear reactor control systems

Astrée is certified by NIST as satisfying criteria for sound static code analysis (2020) and complies with ISO 26262 (automotive), DO-178B/C (aerospace), IEC-61508 (functional safety), and EN-50128 (railway).

**Technical Capabilities:**

The analyzer detects divisions by zero, buffer overflows, null pointer dereferences, data races, and deadlocks. It also estimates Worst-Case Execution Time (WCET) — critical for real-time systems where missing a deadline can be as dangerous as computing the wrong answer.

### SpaceX: A Different Philosophy

[SpaceX](https://www.spacex.com/) takes a somewhat different approach to software verification. Falcon 9 runs three dual-core x86 processors executing Linux, with code written in C/C++. The architecture relies on triplex redundancy — three independent computers that vote on decisions — to tolerate both hardware failures and potential software bugs.

As SpaceX engineers have noted: "Writing the software is some small percentage of what actually goes into getting it ready to fly." The verification process involves extensive simulation, defensive programming, and fault-tolerant architecture.

For NASA's Commercial Crew Demo-1 mission, the requirement was explicit: software must be tolerant to any two simultaneous faults. Redundancy compensates for uncertainty.

### The Verification Spectrum

These approaches represent different points on a verification spectrum:

| Approach | Assurance Level | Cost | Applicability |
|----------|-----------------|------|---------------|
| **Formal proof** (seL4) | Mathematical certainty | Very high | Critical kernels, security foundations |
| **Static analysis** (Astrée) | Absence of specific bug classes | High | Safety-critical applications |
| **Model checking** | Exhaustive state exploration | Medium-high | Protocol verification, concurrent systems |
| **Redundancy** (SpaceX) | Fault tolerance | Medium | Systems where verification cost exceeds redundancy cost |
| **Testing** | Confidence, not proof | Variable | Everything (necessary but not sufficient) |

### LOGOS and Space Systems

Natural language requirements documents are standard in aerospace. "The system shall not permit commanded thrust during crew egress" is a requirement that must be translated into verified software behavior.

LOGOS enables this translation explicitly. A requirement stated in controlled English can be parsed into [first-order logic](https://plato.stanford.edu/entries/logic-classical/), which can then be checked against formal specifications of the software. The gap between what the requirement document says and what the code does becomes formally verifiable.

Combined with tools like [Z3](https://github.com/Z3Prover/z3) for satisfiability checking, this pipeline could reduce the manual effort in aerospace verification while increasing confidence in the translation from requirements to implementation.

### The Stakes

When software fails in space, there's no patch deployment. The Artemis astronauts will be 250,000 miles from the nearest software engineer. Every line of code, every state transition, every interrupt handler must work correctly the first time and every time after.

Formal verification doesn't make this easy. But it makes it possible to know — with mathematical certainty — that critical properties hold. In an environment where "pretty sure" isn't good enough, proof matters.

### Further Reading

- [NASA Formal Methods Symposium 2025](https://shemesh.larc.nasa.gov/nfm2025/)
- [seL4 Foundation](https://sel4.systems/)
- [DO-178C Overview](https://en.wikipedia.org/wiki/DO-178C)
- [Astrée Static Analyzer](https://www.absint.com/astree/index.htm)
- [NASA IV&V Program](https://www.nasa.gov/ivv-services/)
"#,
        tags: &["aerospace", "verification", "safety", "space"],
        author: "LOGICAFFEINE Team",
    },
    Article {
        slug: "smart-contract-verification-defi-security",
        title: "Smart Contract Verification: Formal Methods Meet DeFi Security",
        date: "2026-01-28",
        summary: "With $77 billion lost to smart contract exploits, formal verification tools like Certora are becoming essential infrastructure. The same mathematical techniques that prove aerospace software correct can prove financial contracts behave as specified.",
        content: r#"
## The $77 Billion Problem

Between 2023 and 2025, approximately $77.1 billion was lost to smart contract exploits. In 2024 alone, $1.42 billion disappeared across 310 security incidents. Access control flaws caused 59% of 2025 losses; 34.6% of exploits stemmed from faulty input validation.

These aren't theoretical risks. In February 2025, [Bybit lost $1.5 billion](https://www.chainalysis.com/) in under 15 minutes. In May 2025, Cetus DEX lost $223 million due to a missing overflow check. A single missing validation in a single function cost a quarter billion dollars.

Traditional software testing — even extensive testing — cannot guarantee the absence of such bugs. [Formal verification](https://www.certora.com/) can.

### The DAO Hack: Where It Started

The case for smart contract verification crystallized in 2016 with [The DAO hack](https://www.gemini.com/cryptopedia/the-dao-hack-makerdao). Approximately $150 million in ETH was stolen through a reentrancy attack — a bug class where a contract calls back into itself before updating its state, allowing repeated withdrawals.

The vulnerability had been identified before the attack. A fix was pending. The attacker moved faster.

The aftermath split Ethereum into two chains (Ethereum and Ethereum Classic) and established a precedent: smart contract bugs have existential consequences, and traditional development practices aren't sufficient.

### Verification Tools: The Current Landscape

**[Certora](https://www.certora.com/)** leads the formal verification space for smart contracts. The platform:

- Secures over $100 billion in total value locked (TVL)
- Serves Aave, MakerDAO, Uniswap, Lido, EigenLayer, and the Solana Foundation
- Has written over 70,000 verification rules
- Claims to "secure 70% of top protocols"

A notable finding: Certora discovered a fundamental flaw in MakerDAO's core DAI equation — a bug that had been present since 2018, undetected through years of audits. The formal verifier found it in 23 seconds. Fuzz testing had failed to find it after 125 million iterations.

Certora also discovered a bug in SushiSwap's Trident pools before deployment and open-sourced the Certora Prover in February 2025.

**[Trail of Bits](https://www.trailofbits.com/)** developed several essential tools:

- **Echidna**: Property-based fuzzer that generates randomized test cases
- **Slither**: Static analyzer that identifies vulnerability patterns
- **Manticore**: Symbolic execution engine for deep analysis

**[OpenZeppelin](https://www.openzeppelin.com/)** provides:

- Auditing services protecting over $50 billion in assets
- Trusted Solidity and Cairo libraries used across the ecosystem
- Zero-knowledge proof verification services

### How Formal Verification Works

Formal verification for smart contracts follows a process similar to aerospace verification:

**1. Specification**: Define what the contract should do in formal logic. "The total supply of tokens must equal the sum of all balances" becomes a mathematical invariant.

**2. Analysis**: The verifier explores all possible execution paths, proving the specification holds in every case — not just tested cases.

**3. Counterexamples**: If verification fails, the tool provides a concrete counterexample: specific inputs that violate the specification, enabling targeted debugging.

This differs fundamentally from testing. Testing shows the presence of bugs; formal verification proves their absence (for specified properties).

### Case Studies: What Verification Could Have Prevented

**Wormhole Bridge (February 2022)** — $320+ million stolen. The attacker bypassed signature verification by injecting a fake system account. A formal specification stating "all transfers require valid signatures from authorized accounts" would have caught the missing check.

**Euler Finance (March 2023)** — $197 million stolen via flash loan attack. A missing check on liquidity status in the DonateToReserve function allowed manipulation. An invariant specifying "donations cannot create undercollateralized positions" would have identified the vulnerability.

**Ronin Bridge (March 2022)** — $625 million stolen by the North Korean Lazarus Group. This was a key compromise, not a code bug — 5 of 9 validator keys were obtained through social engineering. Formal verification of code wouldn't have helped; operational security failed.

The distinction matters: formal verification proves code correctness, not operational security.

### The Economics of Verification

Formal verification isn't cheap. Comprehensive verification of a complex protocol can exceed $200,000. Audits from top firms (Trail of Bits, OpenZeppelin, Certora) command premium prices.

But the economics increasingly favor verification:

- A $200,000 verification cost is trivial compared to a $200 million exploit
- Only 30% of DeFi developers had integrated formal verification as of Q3 2025
- Pilot programs show formal verification can reduce vulnerabilities by up to 70%

The industry is converging on a layered approach:

1. **Static analysis** (Slither) catches common patterns quickly
2. **Fuzzing** (Echidna) explores edge cases through randomized testing
3. **Formal verification** (Certora) proves critical invariants
4. **Bug bounties** (Immunefi, HackerOne) incentivize external review
5. **Continuous monitoring** (Forta, Tenderly) detects anomalies in production

### The LOGOS Connection

Smart contract specifications are often written in natural language, then manually translated to formal properties. This translation is error-prone — the specification might not capture what the developer intended, or the formal property might not match the English description.

LOGOS addresses this gap. A specification like:

> "The total supply of tokens must always equal the sum of all account balances"

Can be parsed into [first-order logic](https://plato.stanford.edu/entries/logic-classical/):

```
∀t(TotalSupply(t) = Σ(Balance(a, t)) for all accounts a)
```

This formal representation can then be fed to verification tools, checked against implementations, and traced back to the original requirement. The translation becomes explicit and verifiable rather than implicit and error-prone.

### What Changes

As stablecoins become regulated financial infrastructure under the [GENIUS Act](https://www.congress.gov/bill/119th-congress/senate-bill/1582) and DeFi protocols manage billions in Treasury-backed assets, the stakes for smart contract correctness approach those of aerospace or medical devices.

The same [Z3 theorem prover](https://github.com/Z3Prover/z3) used to verify flight control software can verify stablecoin reserve management. The same formal methods that prove absence of buffer overflows can prove absence of reentrancy vulnerabilities.

The tools exist. The economic incentive exists. The remaining challenge is adoption — integrating formal verification into development workflows as a standard practice rather than an expensive add-on.

### Further Reading

- [Certora](https://www.certora.com/)
- [Trail of Bits](https://www.trailofbits.com/)
- [Halborn DeFi Hacks Report 2025](https://www.halborn.com/reports/top-100-defi-hacks-2025)
- [The DAO Hack Explained](https://www.gemini.com/cryptopedia/the-dao-hack-makerdao)
- [Aave Continuous Formal Verification](https://governance.aave.com/t/security-and-agility-of-aave-smart-contracts-via-continuous-formal-verification/10181)
"#,
        tags: &["blockchain", "verification", "security", "defi"],
        author: "LOGICAFFEINE Team",
    },
    Article {
        slug: "medical-device-software-verification",
        title: "Medical Device Software: When Bugs Kill Patients",
        date: "2026-01-27",
        summary: "The Therac-25 accidents killed patients through software race conditions. Modern medical devices contain hundreds of thousands of lines of code. IEC 62304 and formal verification techniques are how we prevent the next tragedy.",
        content: r#"
## The Therac-25 Lesson

Between 1985 and 1987, the [Therac-25](https://en.wikipedia.org/wiki/Therac-25) radiation therapy machine caused at least six accidents where patients received approximately 100 times the intended radiation dose. Multiple patients died. It remains "the worst series of radiation accidents in the 35-year history of medical accelerators."

The cause was software. Specifically: race conditions in concurrent programming and the removal of hardware interlocks in favor of software-only safety checks.

The manufacturer initially dismissed user complaints as "impossible" — the software couldn't produce those readings. The software could. It did. Patients paid with their lives.

### The Complexity Problem

Modern medical devices are orders of magnitude more complex than the Therac-25:

- Contemporary pacemakers: up to **80,000 lines of code**
- Infusion pumps: more than **170,000 lines of code**
- A 200,000-line device can have more than **10^12 individual execution paths**

Manual analysis of all paths in a 200,000-line device would require 20,000 developers working for over 100 years. Testing all paths isn't just impractical; it's mathematically impossible within any reasonable timeframe.

### IEC 62304: The Software Lifecycle Standard

[IEC 62304](https://en.wikipedia.org/wiki/IEC_62304) is the international standard for medical device software lifecycle processes, recognized by the FDA, European regulators, and health authorities worldwide.

The standard classifies software by risk:

| Class | Risk Level | Example |
|-------|------------|---------|
| **A** | No injury possible | Data display, documentation |
| **B** | Non-serious injury possible | Monitoring alerts, dosage calculations with manual override |
| **C** | Death or serious injury possible | Closed-loop drug delivery, radiation therapy control |

Class C software — where bugs can kill — requires the most rigorous verification. Changes must be verified through testing, regression testing is mandatory, and integration with [ISO 14971](https://en.wikipedia.org/wiki/ISO_14971) risk management is required throughout development.

The FDA recognizes IEC 62304 conformity, which can significantly reduce 510(k) submission documentation requirements.

### Why Testing Isn't Enough

The fundamental limitation of testing is coverage. A test demonstrates that specific inputs produce correct outputs. It says nothing about untested inputs.

For the Therac-25, the race condition that caused overdoses occurred only under specific timing conditions — when operators entered commands at a particular speed in a particular sequence. Normal testing didn't trigger it. The condition existed in the code, invisible to testers.

Formal verification inverts this relationship. Instead of checking specific inputs, formal methods prove that properties hold for **all possible inputs**. "The radiation dose shall never exceed the prescribed maximum" becomes a mathematical statement verified against the code itself.

### Formal Methods in Medical Device Verification

Research applications of formal verification in medical devices:

**Insulin Infusion Pumps**: Researchers have used [Event-B](https://en.wikipedia.org/wiki/Event-B) modeling language and Rodin proof tools to verify safety properties of insulin pump software. The Generic Infusion Pump (GIP) Project created a reference implementation verifiable against safety requirements.

**Pacemakers**: Pacemaker software has been formalized using Event-B, with Abstraction Trees enabling closed-loop model checking — verifying not just the device software but its interaction with models of cardiac physiology.

**Static Analysis**: [Formal methods-based static analysis](https://www.embedded.com/a-formal-methods-based-verification-approach-to-medical-device-software-analysis/) can exhaustively explore software behavior in minutes, proving absence of runtime errors like null pointer dereferences, buffer overflows, and arithmetic exceptions.

### The Regulatory Trajectory

The FDA has signaled increasing interest in formal methods for pre-market review. Guidance documents acknowledge that traditional testing alone may be insufficient for high-complexity, safety-critical software.

Current trends in FDA regulation emphasize:

- **Software as a Medical Device (SaMD)**: Software that itself qualifies as a medical device, regardless of hardware
- **Cybersecurity**: Connected devices introduce vulnerabilities beyond functional correctness
- **Machine Learning**: AI/ML-based devices require new verification paradigms

[IEC 81001-5](https://www.iso.org/standard/76098.html), now recognized by the FDA, addresses health software security lifecycle — verification must extend beyond functional correctness to include security properties.

### Verification Techniques Applicable to Medical Devices

The same tools used in aerospace apply to medical devices:

**Abstract Interpretation** ([Astrée](https://www.absint.com/astree/index.htm)): Proves absence of runtime errors including divisions by zero, buffer overflows, null pointer dereferences. Already used in nuclear reactor control systems.

**Model Checking**: Exhaustively explores finite state spaces. Effective for protocol verification and concurrent systems — exactly the kind of code that killed Therac-25 patients.

**Theorem Proving** ([Z3](https://github.com/Z3Prover/z3), [Coq](https://coq.inria.fr/)): Generates mathematical proofs of program properties. Higher assurance than other methods; higher cost.

**Formal Specification Languages**: [Event-B](https://www.event-b.org/), [TLA+](https://lamport.azurewebsites.net/tla/tla.html), [Alloy](https://alloytools.org/) enable precise specification of system behavior for analysis.

### LOGOS for Medical Requirements

Medical device requirements documents are written in natural language: "The pump shall cease infusion if the pressure exceeds the safety threshold." These requirements must be translated into software specifications, then into code, then verified.

LOGOS provides a formal semantics for this translation. The English requirement parses to [first-order logic](https://plato.stanford.edu/entries/logic-classical/):

```
∀t∀p(Pressure(t) > SafetyThreshold ∧ Infusing(t) → Cease(t+1))
```

This formal specification can be:
- Checked for internal consistency (does it contradict other requirements?)
- Traced to implementation (does the code satisfy this property?)
- Verified against the final system (does the compiled software maintain this invariant?)

The gap between what regulators read in requirements documents and what verification tools analyze becomes explicit and auditable.

### The Stakes

A modern pacemaker makes life-or-death decisions millions of times over its operational lifetime. An insulin pump calculates drug doses that could cause hypoglycemic shock if wrong. A radiation therapy system delivers energy that heals at correct doses and kills at incorrect ones.

These devices cannot be recalled like smartphones. They cannot be patched over the air. They must work correctly from deployment through end of life, in patients whose physiological states the developers couldn't anticipate.

Formal verification doesn't make this easy. But it provides mathematical guarantees that testing cannot. For software that decides who lives and who dies, those guarantees matter.

### Further Reading

- [Therac-25 Case Study](https://en.wikipedia.org/wiki/Therac-25)
- [IEC 62304 Standard](https://en.wikipedia.org/wiki/IEC_62304)
- [ISO 14971 Risk Management](https://en.wikipedia.org/wiki/ISO_14971)
- [FDA Software as Medical Device](https://www.fda.gov/medical-devices/digital-health-center-excellence/software-medical-device-samd)
- [Event-B Formal Method](https://www.event-b.org/)
- [Formal Methods in Medical Devices Paper](https://link.springer.com/chapter/10.1007/978-3-319-21070-4_39)
"#,
        tags: &["medical", "verification", "safety", "regulation"],
        author: "LOGICAFFEINE Team",
    },
    Article {
        slug: "logos-on-grokipedia",
        title: "LOGOS Recognized on Grokipedia: A Milestone for Natural Language Programming",
        date: "2026-01-26",
        summary: "LOGOS now has its own page on Grokipedia, xAI's community-driven encyclopedia. This independent recognition validates the growing interest in natural language as a programming interface.",
        content: r#"
## LOGOS Joins the Encyclopedia

LOGOS has earned its own entry on [Grokipedia](https://grokipedia.com/page/LOGOS_programming_language), the AI-generated encyclopedia launched by [xAI](https://x.ai) in October 2025. For a domain-specific language focused on translating English to formal logic, independent documentation matters — it means the ideas are resonating beyond our own channels.

### What xAI's Grok Documented

The Grokipedia article, generated by [Grok](https://en.wikipedia.org/wiki/Grok_(chatbot)), provides a technical overview of LOGOS as a language that compiles natural English into either executable [Rust](https://www.rust-lang.org/) code or [first-order logic](https://plato.stanford.edu/entries/logic-classical/) representations. The coverage includes:

- **Dual-mode compilation** — the same English input produces either imperative code or formal logic suitable for [automated theorem proving](https://en.wikipedia.org/wiki/Automated_theorem_proving)
- **Distributed systems primitives** — native [CRDT](https://en.wikipedia.org/wiki/Conflict-free_replicated_data_type) support and peer-to-peer networking via libp2p
- **Formal verification** — integration with the [Z3 theorem prover](https://github.com/Z3Prover/z3), the SMT solver developed by Leonardo de Moura and Nikolaj Bjørner that received the 2015 ACM SIGPLAN Programming Languages Software Award
- **Semantic parsing** — [Montague-style](https://plato.stanford.edu/entries/montague-semantics/) compositional semantics and Neo-Davidsonian event representations

The article also documents current limitations honestly, which we appreciate. Transparency about what LOGOS can and cannot do is important.

### Why Independent Documentation Matters

The history of programming language adoption shows that external validation accelerates credibility. When [Gottlob Frege](https://plato.stanford.edu/entries/frege/) published his *Begriffsschrift* in 1879, establishing the foundations of modern predicate logic, it took decades for mathematicians to recognize its significance. Today, discoverability happens faster — but it still requires independent sources confirming that a project solves real problems.

Having documentation on Grokipedia means researchers, developers, and students exploring natural language programming can find LOGOS through xAI's infrastructure, not just through our own marketing.

### The Broader Context

LOGOS sits at the intersection of several active research areas: [semantic parsing](https://en.wikipedia.org/wiki/Semantic_parsing) (mapping natural language to logical forms), [formal verification](https://en.wikipedia.org/wiki/Formal_verification) (mathematical proofs of program correctness), and the growing interest in AI systems that can reason formally. Companies like [Anthropic](https://www.anthropic.com/) are exploring how large language models can assist with logical reasoning, while tools like Z3 provide the backend verification infrastructure.

We're building LOGOS because we believe natural language shouldn't be a barrier to formal thinking — and independent recognition suggests others agree.

### Try It Yourself

Read the full entry at [grokipedia.com/page/LOGOS_programming_language](https://grokipedia.com/page/LOGOS_programming_language), or experience the language directly in the [Studio](/studio).
"#,
        tags: &["milestone", "community", "announcement"],
        author: "LOGICAFFEINE Team",
    },
    Article {
        slug: "introducing-logicaffeine",
        title: "Introducing LOGICAFFEINE: From Natural Language to Formal Logic",
        date: "2026-01-15",
        summary: "LOGICAFFEINE translates everyday English into rigorous First-Order Logic, making formal reasoning accessible without requiring expertise in symbolic notation.",
        content: r#"
## The Gap Between How We Think and How We Prove

Natural language is imprecise by design. When we say "every student passed an exam," we might mean each student passed at least one exam (possibly different exams), or that there exists a single exam everyone passed. In conversation, context resolves these ambiguities. In formal reasoning, they become logical errors.

[First-order logic](https://plato.stanford.edu/entries/logic-classical/) (FOL) eliminates this ambiguity. Developed by [Gottlob Frege](https://plato.stanford.edu/entries/frege/) in 1879 and independently by [Charles Sanders Peirce](https://plato.stanford.edu/entries/peirce-logic/) in 1885, FOL provides a precise language for expressing statements about objects, their properties, and their relationships. It's the foundation of modern mathematics, database query languages, and [automated theorem proving](https://en.wikipedia.org/wiki/Automated_theorem_proving).

The problem: learning FOL notation is a barrier. LOGICAFFEINE removes that barrier.

### What LOGICAFFEINE Does

LOGICAFFEINE is an English-to-FOL transpiler built on LOGOS. You write sentences in plain English:

> "Every philosopher who teaches logic influences some student."

LOGICAFFEINE parses the sentence using [Montague semantics](https://plato.stanford.edu/entries/montague-semantics/) — a framework developed by mathematician Richard Montague that treats natural language with the same rigor as formal languages — and outputs the corresponding logical formula:

```
∀x((Philosopher(x) ∧ TeachesLogic(x)) → ∃y(Student(y) ∧ Influences(x, y)))
```

The [universal quantifier](https://en.wikipedia.org/wiki/Universal_quantification) (∀) was introduced by Gerhard Gentzen in 1935, derived from a rotated "A" for "all." The [existential quantifier](https://en.wikipedia.org/wiki/Existential_quantification) (∃) was introduced by Giuseppe Peano in 1896, derived from a rotated "E" for "exists." LOGICAFFEINE outputs both Unicode symbols and LaTeX notation.

### Why This Matters Now

The rise of AI systems that can engage in complex reasoning — like [Anthropic's Claude](https://www.anthropic.com/claude), which uses [Constitutional AI](https://www.anthropic.com/research/constitutional-ai-harmlessness-from-ai-feedback) to reason about ethical constraints — has renewed interest in formal logic as a verification layer. If an AI system claims to have proven something, how do we verify the proof?

Formal verification tools like the [Z3 theorem prover](https://github.com/Z3Prover/z3) can check logical validity, but they require input in formal notation. LOGICAFFEINE bridges this gap: you express your reasoning in English, and we produce verifiable formal logic.

This matters for:

- **Critical thinking education** — see exactly what your arguments claim, no symbolic notation required
- **AI alignment research** — express constraints in natural language, verify them formally
- **Software specification** — describe requirements in English, generate testable formal specifications
- **Legal and policy analysis** — identify logical ambiguities in contract language or regulations

### The Technology

LOGICAFFEINE uses a parsing architecture inspired by research in [computational linguistics](https://en.wikipedia.org/wiki/Computational_linguistics). The lexer classifies words using a curated vocabulary database. The parser builds [abstract syntax trees](https://en.wikipedia.org/wiki/Abstract_syntax_tree) using techniques from the [Open Logic Project](https://openlogicproject.org/), a collaborative effort to create open-source logic education materials. The transpiler generates FOL following the notation conventions established in [forall x](https://forallx.openlogicproject.org/), a free textbook used in university logic courses worldwide.

### Get Started

Visit the [Learn page](/learn) for an interactive curriculum starting from first principles, or jump directly into the [Studio](/studio) to experiment with your own sentences.

Formal logic has been the foundation of rigorous reasoning since Aristotle. LOGICAFFEINE makes it accessible to anyone who can write a sentence.
"#,
        tags: &["release", "announcement", "formal-logic"],
        author: "LOGICAFFEINE Team",
    },
    Article {
        slug: "getting-started-with-fol",
        title: "First-Order Logic: A Practical Introduction",
        date: "2026-01-18",
        summary: "First-order logic has been the foundation of mathematical reasoning for over a century. Here's how it works and why LOGICAFFEINE makes it accessible.",
        content: r#"
## What First-Order Logic Actually Is

[First-order logic](https://plato.stanford.edu/entries/logic-classical/) (also called predicate logic or quantificational logic) is a formal system for making precise statements about objects and their relationships. The [Stanford Encyclopedia of Philosophy](https://plato.stanford.edu/) describes it as the standard framework for formalizing mathematical theories and reasoning about computational systems.

The "first-order" designation distinguishes it from propositional logic (which only handles true/false statements) and higher-order logics (which can quantify over predicates themselves). As philosopher [W.V.O. Quine](https://en.wikipedia.org/wiki/Willard_Van_Orman_Quine) noted, first-order logic hits a sweet spot: expressive enough for most mathematical reasoning, constrained enough to have [complete proof systems](https://en.wikipedia.org/wiki/G%C3%B6del%27s_completeness_theorem).

### The Core Components

**Variables** represent arbitrary objects in your domain of discourse. In the formula `∀x(Human(x) → Mortal(x))`, the variable `x` ranges over all objects.

**Quantifiers** specify scope:
- The [universal quantifier](https://en.wikipedia.org/wiki/Universal_quantification) **∀** (introduced by Gentzen in 1935) means "for all"
- The [existential quantifier](https://en.wikipedia.org/wiki/Existential_quantification) **∃** (introduced by Peano in 1896) means "there exists"

**Predicates** express properties and relations. `Human(x)` is a unary predicate (one argument); `Loves(x, y)` is binary (two arguments).

**Connectives** combine statements:
- `∧` (conjunction): "and"
- `∨` (disjunction): "or"
- `→` (implication): "if...then"
- `¬` (negation): "not"

### A Historical Example

The classic syllogism "All humans are mortal; Socrates is human; therefore Socrates is mortal" becomes:

```
Premise 1: ∀x(Human(x) → Mortal(x))
Premise 2: Human(socrates)
Conclusion: Mortal(socrates)
```

This is valid by [universal instantiation](https://en.wikipedia.org/wiki/Universal_instantiation) — substituting a specific constant (`socrates`) for the universally quantified variable. [Aristotle](https://plato.stanford.edu/entries/aristotle-logic/) analyzed this pattern 2,400 years ago; FOL provides the modern formal notation.

### Why Precision Matters

Consider: "Every student admires some professor."

This sentence has two valid interpretations:
1. `∀x(Student(x) → ∃y(Professor(y) ∧ Admires(x, y)))` — each student admires at least one professor (possibly different professors)
2. `∃y(Professor(y) ∧ ∀x(Student(x) → Admires(x, y)))` — there's one professor everyone admires

The difference is [quantifier scope](https://plato.stanford.edu/entries/quantification/). In natural language, both readings are valid. In formal logic, you must choose. This precision is why FOL underlies [database query languages](https://en.wikipedia.org/wiki/Relational_algebra), [automated theorem provers](https://en.wikipedia.org/wiki/Automated_theorem_proving), and formal software specifications.

### How LOGICAFFEINE Helps

Traditional FOL education requires memorizing symbols and manipulation rules — the approach used in university courses and textbooks like [forall x](https://forallx.openlogicproject.org/) from the [Open Logic Project](https://openlogicproject.org/).

LOGICAFFEINE inverts this: you write natural English, and we show the formal translation. This builds intuition for what logical structure underlies everyday statements. When you see that "No cats are dogs" becomes `¬∃x(Cat(x) ∧ Dog(x))`, you understand negation scope experientially rather than abstractly.

### Practical Applications

FOL isn't just academic. It's embedded in:

- **Databases**: SQL's `WHERE` clauses implement FOL predicates; `EXISTS` and `NOT EXISTS` are quantifiers
- **Formal verification**: Tools like the [Z3 theorem prover](https://github.com/Z3Prover/z3) check logical satisfiability for software correctness proofs
- **AI systems**: Knowledge representation in expert systems and semantic web technologies like [OWL](https://en.wikipedia.org/wiki/Web_Ontology_Language) builds on description logics derived from FOL
- **Legal reasoning**: Contract analysis tools identify ambiguous clauses by detecting scope ambiguities

### Next Steps

The [Learn page](/learn) offers an interactive curriculum progressing from basic predicates through quantifier nesting and scope ambiguity. The [Studio](/studio) provides a sandbox for experimenting with arbitrary sentences.

First-order logic has been the backbone of precise reasoning since [Frege](https://plato.stanford.edu/entries/frege/) and [Peirce](https://plato.stanford.edu/entries/peirce-logic/) independently invented it in the 1870s-1880s. LOGICAFFEINE makes that precision accessible without the notation barrier.
"#,
        tags: &["tutorial", "beginner", "formal-logic", "education"],
        author: "LOGICAFFEINE Team",
    },
    Article {
        slug: "studio-mode-playground",
        title: "The LOGICAFFEINE Studio: Interactive Logic Exploration",
        date: "2026-01-20",
        summary: "The Studio provides real-time English-to-FOL translation, multiple output formats, syntax visualization, and AST inspection for exploring how natural language maps to formal logic.",
        content: r#"
## A Workbench for Formal Reasoning

The LOGICAFFEINE Studio is an interactive environment for exploring how natural language maps to [first-order logic](https://plato.stanford.edu/entries/logic-classical/). Unlike static textbooks or one-way compilers, the Studio provides immediate feedback as you type, helping you build intuition for logical structure.

### Real-Time Translation

Type any English sentence and watch the FOL translation update live. The parser processes your input through several stages:

1. **Lexical analysis** — words are classified (nouns, verbs, quantifiers, connectives) using a vocabulary database informed by [computational linguistics](https://en.wikipedia.org/wiki/Computational_linguistics) research
2. **Syntactic parsing** — the sentence structure is analyzed following patterns from [Montague grammar](https://plato.stanford.edu/entries/montague-semantics/)
3. **Semantic composition** — meanings combine according to the [principle of compositionality](https://en.wikipedia.org/wiki/Principle_of_compositionality): the meaning of the whole derives from the meanings of parts and their syntactic combination
4. **FOL generation** — the final logical formula is produced

This pipeline mirrors how theoretical linguists analyze meaning, but made interactive.

### Output Formats

The Studio supports multiple notation systems:

**Unicode symbols** — the modern standard used in academic papers and digital communication:
```
∀x(Human(x) → ∃y(Heart(y) ∧ Has(x, y)))
```

**LaTeX notation** — for integration with academic typesetting:
```
\forall x (Human(x) \rightarrow \exists y (Heart(y) \land Has(x, y)))
```

The [universal quantifier symbol](https://en.wikipedia.org/wiki/Universal_quantification) (∀) was introduced by [Gerhard Gentzen](https://en.wikipedia.org/wiki/Gerhard_Gentzen) in 1935 — a rotated "A" for "all." Gentzen also developed [natural deduction](https://en.wikipedia.org/wiki/Natural_deduction), the proof system underlying many modern theorem provers.

### Syntax Highlighting

The Studio color-codes your input to reveal logical structure:

- **Quantifier words** (every, all, some, no) highlighted in purple
- **Nouns and noun phrases** in blue — these become predicates or constants
- **Verbs** in green — these become predicates relating arguments
- **Connectives** (and, or, if, not) highlighted to show logical structure

This visualization helps you see how English grammar maps to logical form before you even look at the output.

### Abstract Syntax Tree Inspection

For deeper analysis, the Studio displays the [abstract syntax tree](https://en.wikipedia.org/wiki/Abstract_syntax_tree) (AST) of your sentence. The AST reveals:

- How quantifier scope is resolved (which quantifier binds which variable)
- How relative clauses attach to their head nouns
- How coordination (and/or) groups constituents
- Where ambiguity might arise in the parsing

This feature is particularly useful for understanding sentences with multiple valid interpretations — you can see exactly how LOGICAFFEINE resolved the ambiguity.

### Exploration Strategies

**Start with classic examples:**
- "All humans are mortal" — basic universal quantification
- "Some philosophers are wise" — existential quantification
- "No cats are dogs" — negated existentials

**Explore quantifier interaction:**
- "Every student read some book" — compare `∀∃` vs `∃∀` readings
- "Most students who take logic pass some exam" — restricted quantification

**Test ambiguous constructions:**
- "The professor saw the student with the telescope" — attachment ambiguity
- "Flying planes can be dangerous" — structural ambiguity

**Examine complex sentences:**
- Build up from simple predicates to nested quantifiers
- Compare how small wording changes affect logical structure

### Technical Foundation

The Studio is built on LOGOS, which compiles to [Rust](https://www.rust-lang.org/) for the web interface via WebAssembly. The parsing architecture uses techniques documented in the [Open Logic Project](https://openlogicproject.org/) materials, adapted for real-time interactive use.

For verified outputs, LOGICAFFEINE can connect to the [Z3 theorem prover](https://github.com/Z3Prover/z3) to check satisfiability — confirming that your logical formula is consistent (or identifying contradictions).

### Open the Studio

The [Studio](/studio) is freely available. No account required — just start typing and explore how your natural language intuitions map to formal logical structure.

As linguist Barbara Partee [famously said](https://plato.stanford.edu/entries/montague-semantics/) about lambda calculus in semantics: "Lambdas changed my life." The Studio aims to provide similar revelations about the hidden logical structure of everyday language.
"#,
        tags: &["feature", "tutorial", "tools"],
        author: "LOGICAFFEINE Team",
    },
    Article {
        slug: "formal-verification-matters",
        title: "Why Formal Verification Matters: From Aviation to AI",
        date: "2026-01-22",
        summary: "Formal verification uses mathematical proof to guarantee software correctness. Here's why industries from aerospace to AI are adopting these techniques.",
        content: r#"
## Beyond Testing: Mathematical Proof of Correctness

Testing can show the presence of bugs, but never their absence. [Formal verification](https://en.wikipedia.org/wiki/Formal_verification) takes a different approach: mathematically proving that software behaves correctly for all possible inputs, not just the ones you thought to test.

This distinction matters when failure is catastrophic. In aviation, medical devices, and financial systems, "works in testing" isn't good enough.

### The Aerospace Standard

The [DO-178C](https://en.wikipedia.org/wiki/DO-178C) standard, recognized by the FAA in 2013, defines software certification requirements for airborne systems. It specifies five criticality levels, with Level A (catastrophic failure) requiring the most rigorous verification.

The [DO-333 supplement](https://en.wikipedia.org/wiki/DO-178C) specifically addresses formal methods as a complement to traditional testing. Since 2001, [Airbus](https://en.wikipedia.org/wiki/Airbus) has deployed formal verification tools across its avionics development. Model checking alone has found 26 errors in flight control systems that traditional testing missed — errors that could have caused mode confusion in critical flight phases.

### How It Works

Formal verification typically involves three components:

**Specification** — a precise description of what the software should do, expressed in formal logic. This is where [first-order logic](https://plato.stanford.edu/entries/logic-classical/) and its extensions become essential.

**Implementation** — the actual code.

**Proof** — mathematical evidence that the implementation satisfies the specification for all possible executions.

The [Z3 theorem prover](https://github.com/Z3Prover/z3), developed by Leonardo de Moura and Nikolaj Bjørner, is the most widely-used tool for automated verification. It won the 2015 ACM SIGPLAN Programming Languages Software Award and the 2018 ETAPS Test of Time Award. Z3 handles [satisfiability modulo theories](https://en.wikipedia.org/wiki/Satisfiability_modulo_theories) (SMT) — checking whether logical formulas involving arithmetic, arrays, and other data structures have solutions.

### Beyond Aviation

**Automotive**: [ISO 26262](https://en.wikipedia.org/wiki/ISO_26262) mandates formal methods for safety-critical automotive software. Braking systems, steering controls, and autonomous driving components increasingly require verified implementations.

**Finance**: High-frequency trading systems and smart contracts use formal verification to prevent costly errors. A single bug in a trading algorithm can cause millions in losses before humans can intervene.

**Cryptography**: Security-critical code is increasingly verified against formal specifications. The [CompCert](https://en.wikipedia.org/wiki/CompCert) verified C compiler and [seL4](https://en.wikipedia.org/wiki/SEL4) verified microkernel demonstrate that even foundational system software can be formally verified.

**AI Systems**: As AI takes on consequential decisions, formal verification provides accountability. [Anthropic](https://www.anthropic.com/), the company behind Claude, researches [Constitutional AI](https://www.anthropic.com/research/constitutional-ai-harmlessness-from-ai-feedback) — using formal constraints to guide AI behavior. Verification tools can check whether AI systems respect specified constraints across all possible inputs.

### The Natural Language Gap

Traditional formal verification requires specifications in mathematical notation. Engineers must translate requirements documents — written in English — into formal specifications. This translation is error-prone and creates a barrier to adoption.

LOGICAFFEINE addresses this gap. By parsing natural language directly into [first-order logic](https://plato.stanford.edu/entries/logic-classical/), we enable:

- **Requirements traceability** — natural language requirements map directly to formal specifications
- **Stakeholder communication** — non-technical stakeholders can review specifications in English while engineers work with formal versions
- **Rapid prototyping** — explore logical implications of requirements before committing to implementations

### The LOGOS Verification Pipeline

LOGOS, the engine behind LOGICAFFEINE, includes optional Z3 integration for static verification. When enabled, you can:

1. Express properties in natural English
2. Automatically translate to FOL
3. Check satisfiability and validity via Z3
4. Receive results with explanations

This brings formal verification closer to the accessibility threshold needed for broader adoption.

### Getting Started

The [Studio](/studio) provides interactive exploration of logical translations. The [Learn page](/learn) covers the fundamentals of first-order logic needed to understand verification results.

Formal verification has proven its value in the most demanding industries. LOGICAFFEINE works to make that rigor accessible beyond specialists.
"#,
        tags: &["verification", "formal-logic", "engineering", "safety"],
        author: "LOGICAFFEINE Team",
    },
    Article {
        slug: "montague-semantics-nlp",
        title: "Montague Semantics: The Mathematics Behind Natural Language",
        date: "2026-01-24",
        summary: "Richard Montague proved that natural language could be analyzed with the same mathematical rigor as formal logic. His framework powers modern semantic parsing, including LOGICAFFEINE.",
        content: r#"
## "There Is No Important Theoretical Difference"

In 1970, mathematician [Richard Montague](https://en.wikipedia.org/wiki/Richard_Montague) made a bold claim: "There is no important theoretical difference between natural languages and the artificial languages of logicians."

This was radical. Linguists had long treated natural language as fundamentally different from formal systems — messy, ambiguous, context-dependent. Montague argued the opposite: natural language could be given a fully rigorous [model-theoretic semantics](https://en.wikipedia.org/wiki/Semantics_of_logic), just like first-order logic.

He proved it by constructing one.

### The Montague Framework

[Montague semantics](https://plato.stanford.edu/entries/montague-semantics/), documented in three papers published between 1970 and 1973, treats natural language interpretation as mathematical function composition.

The core principle is **compositionality**: the meaning of a complex expression is determined by the meanings of its parts and the way they're syntactically combined. This mirrors how formal logic builds complex formulas from atomic predicates using connectives and quantifiers.

Montague used [typed lambda calculus](https://en.wikipedia.org/wiki/Typed_lambda_calculus) as the "glue" for composition. As linguist Barbara Partee [later wrote](https://plato.stanford.edu/entries/montague-semantics/): "Lambdas changed my life." Lambda expressions let you represent functions that combine word meanings into phrase meanings, phrase meanings into sentence meanings, and ultimately into [first-order logic](https://plato.stanford.edu/entries/logic-classical/) formulas.

### How Composition Works

Consider "Every student reads."

In Montague's framework:
- "student" denotes a predicate: `λx.Student(x)`
- "reads" denotes a predicate: `λx.Reads(x)`
- "every" is a function that takes a predicate and returns a quantified expression: `λP.λQ.∀x(P(x) → Q(x))`

Combining these:
1. "every student" = `λQ.∀x(Student(x) → Q(x))`
2. "every student reads" = `∀x(Student(x) → Reads(x))`

The meaning assembles compositionally, just like building a complex number from simpler operations.

### Intensional Logic

Montague extended [first-order logic](https://plato.stanford.edu/entries/logic-classical/) to handle intensional contexts — cases where substituting equivalent expressions changes meaning.

"John believes the morning star is bright" and "John believes the evening star is bright" can have different truth values even though the morning star *is* the evening star (both are Venus). Montague's [intensional logic](https://en.wikipedia.org/wiki/Intensional_logic) captures this by distinguishing between the extension (the actual referent) and the intension (the concept or sense).

This matters for AI systems that reason about beliefs, knowledge, and possibility — all intensional notions.

### From Theory to NLP

Montague's work influenced the development of [semantic parsing](https://en.wikipedia.org/wiki/Semantic_parsing): computational systems that map natural language to logical forms.

Modern approaches include:
- **Rule-based systems** using explicit Montague-style grammars
- **Neural semantic parsers** trained on (sentence, logical form) pairs
- **Hybrid systems** combining learned representations with compositional structure

Recent research at institutions like [Stanford NLP](https://nlp.stanford.edu/) and [Google Research](https://research.google/) explores how large language models can learn compositional semantic representations — essentially rediscovering Montague's insights through statistical learning.

### LOGICAFFEINE's Approach

LOGICAFFEINE implements a Montague-inspired pipeline:

1. **Lexical lookup** — words are assigned semantic types and lambda expressions
2. **Type-driven parsing** — syntactic analysis follows type-compatibility constraints
3. **Lambda reduction** — complex meanings are computed through function application
4. **FOL output** — final formulas use notation from the [Open Logic Project](https://openlogicproject.org/) conventions

This architecture handles:
- Quantifier scope ambiguity (multiple valid readings)
- Relative clauses ("students who study")
- Coordination ("reads and writes")
- Negation scope ("not every student reads" vs "every student doesn't read")

### The Legacy

Montague died in 1971, at 40, before seeing the full impact of his work. Today, his framework underlies:

- Formal semantics curricula at universities worldwide
- Computational linguistics and NLP research
- Knowledge representation in AI systems
- Semantic web technologies

The [Stanford Encyclopedia of Philosophy](https://plato.stanford.edu/entries/montague-semantics/) maintains a comprehensive entry on Montague semantics, documenting both the original theory and subsequent developments.

### Try It Yourself

The [Studio](/studio) lets you see Montague-style composition in action. Type a sentence and examine the AST to see how meanings combine. The [Learn page](/learn) covers the underlying logical concepts.

Montague proved that natural language has mathematical structure. LOGICAFFEINE makes that structure visible.
"#,
        tags: &["linguistics", "formal-logic", "research", "education"],
        author: "LOGICAFFEINE Team",
    },
];
