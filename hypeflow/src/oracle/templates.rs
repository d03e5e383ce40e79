// Canned oracle responses. Plain text with emoji markers; the terminal
// front-end and the API render them verbatim.

pub const JORDAN_SELL: &str = "\
Regarding selling your Michael Jordan cards right now, here's my honest assessment:

📊 Current Market Context
Jordan cards are in an interesting spot. We've seen some cooling from the 2020-2021 peaks, \
but his market has found strong support levels. The key question is which Jordan card you have \
and its condition.

🔴 SELL NOW if:
• You have raw cards in questionable condition (PSA 6 or lower potential)
• You need liquidity and can't wait for optimal timing
• You're holding modern Jordan inserts/parallels (these have cooled significantly)
• You bought during the 2021 peak and want to minimize losses

🟢 HOLD if:
• You have high-grade vintage (PSA 8+ from the 1980s-1990s)
• Your cards are in true mint condition and ungraded
• You can wait 12-18 months for the next market cycle
• You believe in Jordan's long-term collecting legacy (which I do)

⏱ Market Timing
Basketball season is starting soon, which typically provides a 10-15% boost. However, interest \
rates and economic uncertainty are keeping some collectors on the sidelines.

💡 Bottom line: if it's high-quality vintage Jordan (especially the '86 Fleer rookie), I'd lean \
toward holding unless you need the money. The GOAT's cards always find their way back up.

What specific Jordan card are you considering selling?";

pub const MAHOMES_SELL: &str = "\
Great timing on this Mahomes question:

📊 Current Reality
Mahomes rookie prices have compressed about 40-50% from their 2021-2022 peaks. The good news? \
They've found solid support and aren't falling further. The market has matured.

My take: HOLD for now.

🟢 Bullish Factors:
• Still only 29 years old with 5+ elite years ahead
• Chiefs are legitimate dynasty contenders
• His cards are undervalued compared to Brady at a similar career stage
• Strong fundamentals, he's not going anywhere

⏱ Market Timing
We're entering NFL season. If the Chiefs make another deep playoff run, expect 20-30% price \
appreciation. Summer was the worst time to sell football cards.

🔴 However, sell NOW if:
• You bought at peak prices and want to cut losses
• You have lower-end parallels or base cards
• You need immediate liquidity

💡 My Strategy: hold through this season and reassess in February.

What grade Mahomes rookie are we talking about?";

pub const JORDAN: &str = "\
🏀 MICHAEL JORDAN ANALYSIS

Jordan's 1986 Fleer rookie is the ultimate grail card. Here's what you need to know:

📊 Market Data:
• PSA 10: $500K+ (up 15% this year)
• PSA 9: $50K+ (up 22% this year)
• PSA 8: $15K+ (up 18% this year)

🎯 Investment Strategy:
• Focus on PSA 8+ grades for best ROI
• Look for cards with perfect centering
• Avoid cards with surface issues
• Our scan found a PSA 8 at $28,500 with 235% upside!

💡 Pro Tip: Jordan cards are recession-proof investments with consistent long-term growth.";

pub const MAHOMES: &str = "\
🏈 PATRICK MAHOMES ANALYSIS

Mahomes is the hottest QB in the market right now!

📊 Recent Performance:
• 2017 Prizm PSA 10: $2,000+ (up 300% in 2 years)
• 2017 Optic PSA 10: $1,500+ (up 250% in 2 years)
• 2017 Select PSA 10: $800+ (up 200% in 2 years)

🎯 Why Buy Now:
• Still in his prime
• Multiple Super Bowl wins
• Market leader in QB cards
• Our scan found underpriced Mahomes cards with 200%+ profit potential

💡 Best Bets: focus on 2017 rookie cards in PSA 9+ condition.";

pub const JORDAN_ROOKIE: &str = "\
🏀 JORDAN '86 FLEER ROOKIE

The holy grail of basketball cards, and the card every serious collection is measured against.

📊 Recent Sales:
• PSA 10: $500K+
• PSA 9: $50K+ (up 22% this year)
• PSA 8: $15K+

🎯 What Drives It:
• Cultural reach well beyond basketball
• A shrinking pool of high-grade copies
• Steady demand from new collectors entering the hobby

💡 Treat it as a blue-chip holding if you can afford the premium. Buy the card, not the slab: \
centering and eye appeal decide resale.";

pub const JORDAN_INVESTMENT: &str = "\
🏀 BUYING JORDAN CARDS

Jordan is a long-term hold, not a flip.

📊 Where The Value Sits:
• High-grade rookies: $15K-$500K+ (up 15-22% this year)
• Key inserts and '90s parallels: steady, slower growth
• Modern Jordan products: cooled off, buy only at a discount

🎯 How To Buy:
• Avoid paying peak prices after a documentary or anniversary spike
• Favor strong eye appeal over a marginally higher grade
• Compare against the last 90 days of sales before bidding

💡 His legacy carries the market through cycles; patience is the edge.";

pub const MAHOMES_ROOKIE: &str = "\
🏈 MAHOMES 2017 ROOKIES

His 2017 rookie class has been on fire.

📊 Key Rookies:
• 2017 Prizm PSA 10: $2,000+ (up from ~$200, about +900%)
• 2017 Optic PSA 10: $1,500+
• 2017 Select PSA 10: $800+

🎯 Why There's Room Left:
• Multiple Super Bowl wins already on the resume
• Prime years still ahead
• Prizm, Select and Optic remain the liquid benchmarks

💡 Stick to PSA 9+ copies of the flagship rookies.";

pub const MAHOMES_INVESTMENT: &str = "\
🏈 BUYING MAHOMES CARDS

Mahomes is in his prime with a long career ahead: short-term swings, long-term upside.

📊 Entry Points:
• 2017 Prizm PSA 10: $2,000+ (up 300% in 2 years)
• 2017 Optic PSA 10: $1,500+ (up 250% in 2 years)
• Our scan found underpriced Mahomes cards with 200%+ profit potential

🎯 Strategy:
• Prizm rookies in PSA 10 hold value best
• Buy into market corrections, not playoff hype
• Skip low-end parallels; they lag the flagship rookies

💡 Build a position during the offseason and hold through the season.";

pub const WEMBANYAMA: &str = "\
🏀 VICTOR WEMBANYAMA ANALYSIS

The hottest rookie in the market, don't miss this opportunity!

📊 Market Explosion:
• 2023 Prizm PSA 10: $2,450+ (up 486% in 6 months)
• 2023 Optic PSA 10: $1,800+ (up 350% in 6 months)
• 2023 Select PSA 10: $1,200+ (up 280% in 6 months)

🎯 Why He's Special:
• 7'4\" unicorn with guard skills
• Already drawing LeBron comparisons
• International appeal means global demand
• Our scan detected a PSA 10 at $2,450 with 486% profit potential!

💡 Investment Strategy: buy PSA 8+ now before prices climb further.";

pub const BURROW: &str = "\
Joe Burrow cards are in a tricky spot right now:

📊 Market Reality Check
His rookie cards peaked in late 2021 after the playoff run to the Super Bowl, then dropped hard \
in 2022 when he got injured. They've been relatively stable since, but haven't really recovered.

💵 Current Values (rough estimates):
• 2020 Prizm #325: PSA 10 ($400-600), PSA 9 ($150-250)
• Raw cards in mint condition: $15-35
• Signed rookies: $200-400 depending on brand

🔴 SELL if:
• You're looking for quick liquidity
• You bought during the 2021 hype and want to cut losses
• You have raw or lower grade cards

🟢 HOLD if:
• You have high-grade rookies (PSA 9/10)
• You can wait 2-3 years for potential appreciation
• You believe he'll have sustained success

💡 Reality Check: Burrow's ceiling is probably Aaron Rodgers-level card values, not \
Mahomes/Brady tier. If you're not emotionally attached, selling might be the right move.

What specific Burrow cards are you holding?";

pub const GRADING_DECISION: &str = "\
Grading decisions can make or break your ROI, so let's think this through:

🟢 Definitely Grade If:
• Card appears mint and is worth $100+ raw
• Centering is 50/50 or very close
• Corners are razor sharp with no fraying
• Surface is pristine with strong gloss
• It's a key rookie or vintage card

🔴 Probably Don't Grade If:
• Obvious centering issues (worse than 70/30)
• Any visible creases, stains, or print defects
• Raw card worth less than $50
• You see edge chipping or corner rounding

💵 Economics Check
PSA grading costs $20-75 depending on service level, plus shipping and insurance. You need \
reasonable confidence of hitting PSA 8+ to make it profitable.

💡 Pro Tips:
• Use a jeweler's loupe to inspect closely
• Compare your card to already-graded examples online
• Consider SGC as a cheaper alternative for vintage

Can you describe the condition of the card you're considering?";

pub const GRADING_MASTERCLASS: &str = "\
🔍 CARD GRADING MASTERCLASS

Grading is THE most important factor in card values:

📈 Value Multipliers:
• PSA 10 = 10x PSA 9 value
• PSA 9 = 3x PSA 8 value
• PSA 8 = 2x PSA 7 value

🎯 Grading Strategy:
• PSA: best for vintage cards (pre-2000)
• BGS: best for modern cards and autographs
• SGC: great for vintage, faster turnaround

💡 Pro Tips:
• Always check centering (40/60 rule)
• Look for surface scratches under light
• Corners must be sharp
• Run the AI Grader tab for a quick pre-check";

pub const OPPORTUNITIES_HEADER: &str =
    "🎯 TOP INVESTMENT OPPORTUNITIES (Based on Live eBay Analysis):\n\n";

pub const OPPORTUNITIES_FOOTER: &str =
    "These are AI-detected underpriced opportunities with the highest profit potential!";

pub const INVESTMENT_OUTLOOK: &str = "\
Here's my current investment outlook for the card market:

🏦 Blue Chip (Lower Risk, Steady Gains):
• Vintage Jordan (especially '86 Fleer), the gold standard
• Brady rookies, GOAT status locked in
• High-grade vintage baseball Hall of Famers
• Pristine vintage basketball (1980s-1990s)

🚀 Growth (Higher Risk, Higher Upside):
• Mahomes rookies, still undervalued for his trajectory
• CJ Stroud rookies, ROTY winner and still affordable
• Ja Morant rookies, discounted due to off-court issues

🎲 Contrarian Plays (Speculative):
• Anthony Richardson, huge upside if he develops
• Zion Williamson, health concerns created opportunity
• Hockey rookies, undervalued market overall

🚫 What I'm Avoiding:
• Overproduced modern base cards
• Injury-prone players
• Retired players past their hype cycles

💡 Treat cards like any investment: diversify, buy quality, have an exit strategy, and never \
invest more than you can afford to lose.

What's your budget and risk tolerance?";

pub const SELL_TIMING: &str = "\
Market timing is crucial in cards. Here's my seasonal playbook:

🏈 Football Cards:
• Peak Season: September-February (regular season + playoffs)
• Dead Season: March-August
• Sweet Spots: Week 1, playoff runs, Super Bowl hype

🏀 Basketball Cards:
• Peak Season: October-June (season + playoffs)
• Dead Season: July-September
• Sweet Spots: All-Star break, playoff runs, Finals

⚾ Baseball Cards:
• Peak Season: March-October
• Rookie Call-ups: May-September (huge for prospects)
• World Series: October boost for participants

📏 General Rules:
• Player performance means immediate 15-40% price swings
• Buy during the offseason, sell during peak performance
• Injuries create buying opportunities

What sport or player are you timing?";

pub const MARKET_ANALYSIS: &str = "\
📊 LIVE MARKET ANALYSIS

Current market conditions:

🔥 Hot Sectors:
• Basketball: +15.3% this month
• Football: +12.7% this month
• Rookie Cards: +18.9% this month

📈 Top Performers:
• Victor Wembanyama: +486%
• LeBron James: +310%
• Luka Dončić: +254%
• Patrick Mahomes: +200%

🎯 Market Trends:
• Rookie cards outperforming veterans
• High-grade cards (PSA 9+) in demand
• International players gaining traction
• Our scan identified 7 underpriced opportunities worth $48,995 total!

💡 Strategy: focus on young superstars with room to grow!";

pub const PORTFOLIO: &str = "\
💼 PORTFOLIO OPTIMIZATION

Build a winning card portfolio with these strategies:

🎯 Allocation Strategy:
• 40% Rookie Cards (highest upside)
• 30% Vintage Stars (stable growth)
• 20% Current Superstars (steady gains)
• 10% Speculative Plays (high risk/reward)

📊 Diversification Rules:
• Mix of sports (Basketball, Football, Baseball)
• Different eras (Vintage, Modern, Current)
• Various grades (PSA 8-10)
• Different price points ($100-$10K+)

💡 Pro Tips:
• Never put all eggs in one basket
• Rebalance quarterly";

pub const SELLING_STRATEGY: &str = "\
💰 SELLING STRATEGY

Knowing when to sell is just as important as buying:

🔴 Sell Signals:
• Card reaches 300%+ profit
• Player has a major injury
• Market shows signs of cooling
• You need liquidity for better opportunities

🟢 Hold Signals:
• Player is still improving
• Market is still growing
• Card is in high demand

💡 Pro Strategy:
• Set profit targets (200%, 500%, 1000%)
• Scale out positions (sell 25% at each target)
• Keep your best cards long-term";

pub const BUDGET: &str = "\
💵 BUDGET-FRIENDLY INVESTING

You don't need thousands to start investing in cards!

$100-500:
• Current rookie cards (PSA 9-10)
• Emerging players with upside

$500-2,000:
• Established star rookies
• Mid-grade vintage cards

$2,000+:
• High-grade vintage
• Superstar rookies
• Blue chip investments

💡 Pro Tip: start small, learn the market, then scale up!";

/// Generic prompts returned when nothing in the query is recognized.
pub const FALLBACKS: [&str; 4] = [
    "That's a great question that really depends on the specifics. What card or player are you \
thinking about? The more context you can give me, the better advice I can provide.\n\n\
Are you looking at buying, selling, grading, or just trying to understand current market values?",
    "I'd love to help with that! The card market is all about context: player performance, \
card condition, market timing, and your personal situation all factor into the best strategy.\n\n\
Can you tell me more about the specific card or situation you're dealing with?",
    "Smart question! Card decisions can be tricky because there are so many moving pieces. \
Values change based on player performance, seasonal trends, card condition, and broader market \
sentiment.\n\nWhat's the specific scenario you're trying to figure out?",
    "That's definitely something I can help you think through! I always start from the \
fundamentals: player trajectory, card quality, market timing, and your personal goals.\n\n\
What player or card has caught your attention? And what's your timeline?",
];
